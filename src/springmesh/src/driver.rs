use std::collections::VecDeque;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::time::Instant;

use protocol::command::{ModelType, Parameter};
use protocol::update_info::UpdateInfo;

use crate::config::DriverConfig;
use crate::controller::Controller;
use crate::controller_message::{ControllerMessage, DriverMessage};
use crate::force::ForceEvent;
use crate::mesh::SpringMesh;

/// Creates the two ends of an instrument: the control-side `Controller`,
/// the `Driver` owned by the audio callback, and the receiver for what the
/// driver reports back.
pub fn instrument(
	config: DriverConfig,
) -> (Controller, Driver, Receiver<DriverMessage>) {
	let (ctx, crx) = sync_channel(config.command_capacity.max(1));
	let (dtx, drx) = sync_channel(config.event_capacity.max(1));
	let controller = Controller::new(ctx, &config);
	let mesh = controller.build_mesh(config.model);
	let driver = Driver::new(config.model, mesh, crx, dtx, &config);
	(controller, driver, drx)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
	Idle,
	Running,
}

/// Runs one mesh step per output sample.
///
/// `process` never blocks and never allocates except when assembling a
/// snapshot at an emission boundary.
pub struct Driver {
	mesh: Option<Box<SpringMesh>>,
	model: Option<ModelType>,
	forces: VecDeque<ForceEvent>,
	force_capacity: usize,
	rx: Receiver<ControllerMessage>,
	tx: SyncSender<DriverMessage>,
	sample_rate: f32,
	snapshot_interval: u64,
	samples: u64,
	dropped_forces: usize,
	rejected: usize,
}

impl Driver {
	pub fn new(
		model: ModelType,
		mesh: SpringMesh,
		rx: Receiver<ControllerMessage>,
		tx: SyncSender<DriverMessage>,
		config: &DriverConfig,
	) -> Self {
		tracing::info!(
			model = %model,
			masses = mesh.masses().len(),
			sample_rate = config.sample_rate,
			"driver started"
		);
		let driver = Self {
			mesh: Some(Box::new(mesh)),
			model: Some(model),
			forces: VecDeque::with_capacity(config.force_capacity),
			force_capacity: config.force_capacity,
			rx,
			tx,
			sample_rate: config.sample_rate,
			snapshot_interval: config.snapshot_interval.max(1),
			samples: 0,
			dropped_forces: 0,
			rejected: 0,
		};
		driver.emit(0.0);
		driver
	}

	pub fn state(&self) -> DriverState {
		if self.mesh.is_some() {
			DriverState::Running
		} else {
			DriverState::Idle
		}
	}

	pub fn mesh(&self) -> Option<&SpringMesh> {
		self.mesh.as_deref()
	}

	pub fn model_type(&self) -> Option<ModelType> {
		self.model
	}

	pub fn samples(&self) -> u64 {
		self.samples
	}

	pub fn pending_forces(&self) -> usize {
		self.forces.len()
	}

	pub fn dropped_forces(&self) -> usize {
		self.dropped_forces
	}

	pub fn rejected(&self) -> usize {
		self.rejected
	}

	/// Fills one block. Returns false once the instrument is closed, in which
	/// case the block is silent.
	pub fn process(&mut self, out: &mut [f32]) -> bool {
		let start = Instant::now();
		while let Ok(msg) = self.rx.try_recv() {
			self.handle(msg);
		}
		let Some(mesh) = self.mesh.as_deref_mut() else {
			out.fill(0.0);
			return false;
		};
		if out.is_empty() {
			return true;
		}
		// forces are only applied on block boundaries
		let force = self.forces.pop_front();
		for (i, s) in out.iter_mut().enumerate() {
			let f = if i == 0 { force.as_ref() } else { None };
			*s = mesh.simulation_step(f);
		}
		let before = self.samples;
		self.samples += out.len() as u64;
		if self.samples / self.snapshot_interval != before / self.snapshot_interval {
			let budget = out.len() as f32 / self.sample_rate;
			self.emit(start.elapsed().as_secs_f32() / budget);
		}
		true
	}

	fn handle(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::Force(f) => {
				if self.mesh.is_none() {
					return;
				}
				if self.forces.len() < self.force_capacity {
					self.forces.push_back(f);
				} else {
					self.dropped_forces += 1;
				}
			}
			ControllerMessage::SetParameter(name, value) => {
				if !value.is_finite() {
					self.rejected += 1;
					return;
				}
				if let Some(mesh) = self.mesh.as_deref_mut() {
					match name {
						Parameter::Mass => mesh.adjust_mass(value),
						Parameter::Tension => mesh.adjust_tension(value),
						Parameter::Damping => mesh.adjust_damping(value),
					}
				}
			}
			ControllerMessage::SwapMesh(ty, mesh) => {
				if self.mesh.is_none() {
					self.retire(mesh);
					return;
				}
				if let Some(old) = self.mesh.replace(mesh) {
					self.retire(old);
				}
				self.model = Some(ty);
			}
			ControllerMessage::Close => {
				if let Some(old) = self.mesh.take() {
					self.retire(old);
				}
				self.model = None;
				self.forces.clear();
				let _ = self.tx.try_send(DriverMessage::Closed);
			}
		}
	}

	fn retire(&self, mesh: Box<SpringMesh>) {
		// if the channel is full the mesh is freed here instead
		let _ = self.tx.try_send(DriverMessage::Retired(mesh));
	}

	fn emit(&self, load: f32) {
		let Some(mesh) = self.mesh.as_deref() else {
			return;
		};
		let info = UpdateInfo {
			load,
			samples: self.samples,
			mass_len: mesh.masses().len(),
			spring_len: mesh.springs().len(),
			resets: mesh.resets(),
			dropped_forces: self.dropped_forces,
			rejected: self.rejected,
		};
		let _ = self.tx.try_send(DriverMessage::Update(mesh.pr_model(), info));
	}
}

impl Drop for Driver {
	fn drop(&mut self) {
		tracing::debug!(samples = self.samples, "driver dropped");
	}
}
