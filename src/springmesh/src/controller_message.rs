use protocol::command::{ModelType, Parameter};
use protocol::pr_model::PrModel;
use protocol::update_info::UpdateInfo;

use crate::force::ForceEvent;
use crate::mesh::SpringMesh;

/// Control side to driver.
pub enum ControllerMessage {
	Force(ForceEvent),
	SetParameter(Parameter, f32),
	SwapMesh(ModelType, Box<SpringMesh>),
	Close,
}

/// Driver to control side.
pub enum DriverMessage {
	Update(PrModel, UpdateInfo),
	/// A replaced mesh, handed back so it is freed off the audio thread.
	Retired(Box<SpringMesh>),
	Closed,
}
