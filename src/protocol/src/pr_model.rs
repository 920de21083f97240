// pr_model: spring mesh state for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrMass {
	pub pos: [f32; 2],
	pub fixed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrSpring {
	pub ends: [[f32; 2]; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub masses: Vec<PrMass>,
	pub springs: Vec<PrSpring>,
	// position of the most recently struck mass
	pub struck: Option<[f32; 2]>,
}
