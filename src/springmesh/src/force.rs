use crate::V2;

/// An external impulse, applied to the mass nearest `location`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceEvent {
	pub location: V2,
	pub force: V2,
}

impl ForceEvent {
	pub fn new(location: V2, force: V2) -> Self {
		Self { location, force }
	}

	pub fn from_arrays(location: [f32; 2], force: [f32; 2]) -> Self {
		Self::new(location.into(), force.into())
	}

	pub fn is_finite(&self) -> bool {
		self.location.iter().chain(self.force.iter()).all(|x| x.is_finite())
	}
}
