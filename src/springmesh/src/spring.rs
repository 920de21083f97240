use crate::mass::{Mass, MassTemplate};
use crate::vmath;
use crate::V2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTemplate {
	pub ms: [MassTemplate; 2],
}

impl SpringTemplate {
	pub fn new(m1: MassTemplate, m2: MassTemplate) -> Self {
		Self { ms: [m1, m2] }
	}
}

/// Linear spring between two masses of a mesh.
///
/// The rest displacement of each endpoint relative to the other is captured
/// once at construction and never updated.
#[derive(Clone, Debug)]
pub struct Spring {
	ms: [usize; 2],
	tension: f32,
	rest: [V2; 2],
	scratch: V2,
}

impl Spring {
	/// `m1` and `m2` index into `masses`.
	pub fn new(masses: &[Mass], m1: usize, m2: usize, tension: f32) -> Self {
		let p1 = masses[m1].get_pos();
		let p2 = masses[m2].get_pos();
		let mut rest = [V2::zeros(); 2];
		vmath::sub_into(p1.as_slice(), p2.as_slice(), rest[0].as_mut_slice());
		vmath::sub_into(p2.as_slice(), p1.as_slice(), rest[1].as_mut_slice());
		Self {
			ms: [m1, m2],
			tension,
			rest,
			scratch: V2::zeros(),
		}
	}

	pub fn endpoints(&self) -> [usize; 2] {
		self.ms
	}

	pub fn get_tension(&self) -> f32 {
		self.tension
	}

	pub fn set_tension(&mut self, tension: f32) {
		self.tension = tension;
	}

	pub fn get_rest(&self) -> [V2; 2] {
		self.rest
	}

	pub fn update_forces(&mut self, masses: &mut [Mass]) {
		let [m1, m2] = self.ms;
		self.push(masses, m1, m2, 0);
		self.push(masses, m2, m1, 1);
	}

	fn push(&mut self, masses: &mut [Mass], this: usize, other: usize, side: usize) {
		let scratch = self.scratch.as_mut_slice();
		vmath::sub_into(
			masses[this].get_pos().as_slice(),
			masses[other].get_pos().as_slice(),
			scratch,
		);
		vmath::rsub_assign(scratch, self.rest[side].as_slice());
		vmath::scale(scratch, self.tension);
		masses[this].apply_force(&self.scratch);
	}
}
