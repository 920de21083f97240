use serde::{Deserialize, Serialize};

/// Statistics sent along with every mesh snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInfo {
	/// Processing time of the emitting block over its real-time budget.
	pub load: f32,
	pub samples: u64,
	pub mass_len: usize,
	pub spring_len: usize,
	/// Masses reset after reaching a non-finite state.
	pub resets: usize,
	pub dropped_forces: usize,
	pub rejected: usize,
}
