use std::sync::mpsc::{SyncSender, TrySendError};

use protocol::command::{Command, ModelType};

use crate::config::DriverConfig;
use crate::controller_message::ControllerMessage;
use crate::force::ForceEvent;
use crate::mesh::SpringMesh;
use crate::physical_model::{Topology, TopologyConfig};
use crate::Error;

/// Control-side handle of an instrument.
///
/// Validates commands and turns them into driver messages. Meshes are built
/// here, never on the audio thread.
pub struct Controller {
	tx: SyncSender<ControllerMessage>,
	topology: TopologyConfig,
	max_dp: f32,
}

impl Controller {
	pub fn new(tx: SyncSender<ControllerMessage>, config: &DriverConfig) -> Self {
		Self {
			tx,
			topology: config.topology.clone(),
			max_dp: config.max_dp,
		}
	}

	pub fn build_mesh(&self, ty: ModelType) -> SpringMesh {
		let mesh = Topology::from_model_type(ty, &self.topology)
			.build()
			.with_max_dp(self.max_dp);
		tracing::debug!(
			model = %ty,
			masses = mesh.masses().len(),
			springs = mesh.springs().len(),
			"built mesh"
		);
		mesh
	}

	pub fn send_json(&self, text: &str) -> Result<(), Error> {
		match Command::from_json(text) {
			Ok(cmd) => self.send(cmd),
			Err(e) => {
				tracing::warn!(error = %e, "rejected command");
				Err(e.into())
			}
		}
	}

	pub fn send(&self, cmd: Command) -> Result<(), Error> {
		let msg = self.translate(cmd).map_err(|e| {
			tracing::warn!(error = %e, "rejected command");
			e
		})?;
		self.tx.try_send(msg).map_err(|e| match e {
			TrySendError::Full(_) => Error::QueueFull,
			TrySendError::Disconnected(_) => Error::Disconnected,
		})
	}

	fn translate(&self, cmd: Command) -> Result<ControllerMessage, Error> {
		let msg = match cmd {
			Command::ForceInjection { location, force } => {
				let f = ForceEvent::from_arrays(location, force);
				if !f.is_finite() {
					return Err(Error::InvalidForce);
				}
				ControllerMessage::Force(f)
			}
			Command::AdjustParameter { name, value } => {
				if !value.is_finite() {
					return Err(Error::InvalidParameter { name, value });
				}
				ControllerMessage::SetParameter(name, value)
			}
			Command::ModelType { value } => {
				tracing::info!(model = %value, "switching model");
				ControllerMessage::SwapMesh(value, Box::new(self.build_mesh(value)))
			}
			Command::Close => ControllerMessage::Close,
		};
		Ok(msg)
	}
}
