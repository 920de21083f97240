pub mod command;
pub mod pr_model;
pub mod update_info;

use pr_model::PrModel;
use update_info::UpdateInfo;

use serde::{Deserialize, Serialize};

/// Envelope for shipping mesh state to an out-of-process viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Message {
	MeshUpdate(PrModel, UpdateInfo),
	Nop,
}

impl Message {
	pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
		bincode::serialize(&self)
	}

	pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
		bincode::deserialize(bytes)
	}
}
