use protocol::command::ModelType;
use serde::{Deserialize, Serialize};

use crate::physical_model::TopologyConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
	pub sample_rate: f32,
	/// Samples between two mesh snapshots.
	pub snapshot_interval: u64,
	pub command_capacity: usize,
	/// Pending force events kept by the driver; extra ones are dropped.
	pub force_capacity: usize,
	pub event_capacity: usize,
	/// Largest displacement of a mass in one step.
	pub max_dp: f32,
	pub model: ModelType,
	pub topology: TopologyConfig,
}

impl Default for DriverConfig {
	fn default() -> Self {
		Self {
			sample_rate: 22050.0,
			snapshot_interval: 1024,
			command_capacity: 64,
			force_capacity: 32,
			event_capacity: 16,
			max_dp: 1.0,
			model: ModelType::String,
			topology: TopologyConfig::default(),
		}
	}
}

impl DriverConfig {
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
		self.sample_rate = sample_rate;
		self
	}

	pub fn with_snapshot_interval(mut self, interval: u64) -> Self {
		self.snapshot_interval = interval.max(1);
		self
	}

	pub fn with_command_capacity(mut self, capacity: usize) -> Self {
		self.command_capacity = capacity;
		self
	}

	pub fn with_force_capacity(mut self, capacity: usize) -> Self {
		self.force_capacity = capacity;
		self
	}

	pub fn with_event_capacity(mut self, capacity: usize) -> Self {
		self.event_capacity = capacity;
		self
	}

	pub fn with_max_dp(mut self, max_dp: f32) -> Self {
		self.max_dp = max_dp;
		self
	}

	pub fn with_model(mut self, model: ModelType) -> Self {
		self.model = model;
		self
	}

	pub fn with_topology(mut self, topology: TopologyConfig) -> Self {
		self.topology = topology;
		self
	}
}
