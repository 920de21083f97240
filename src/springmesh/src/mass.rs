use crate::vmath;
use crate::V2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassTemplate {
	pub id: usize,
	pub pos: V2,
	pub fixed: bool,
}

impl MassTemplate {
	pub fn new(id: usize, pos: V2, fixed: bool) -> Self {
		Self { id, pos, fixed }
	}
}

/// A point mass integrated with unit step Euler.
///
/// Per step, call `apply_force` for every incident force, then
/// `update_velocity`, `update_position` and `clear`, in that order.
#[derive(Clone, Debug)]
pub struct Mass {
	id: usize,
	pos: V2,
	opos: V2,
	vel: V2,
	accel: V2,
	diff: V2,
	mass: f32,
	damping: f32,
	fixed: bool,
}

impl Mass {
	pub fn new(id: usize, pos: V2, mass: f32, damping: f32, fixed: bool) -> Self {
		Self {
			id,
			pos,
			opos: pos,
			vel: V2::zeros(),
			accel: V2::zeros(),
			diff: V2::zeros(),
			mass,
			damping,
			fixed,
		}
	}

	pub fn from_template(t: &MassTemplate, mass: f32, damping: f32) -> Self {
		Self::new(t.id, t.pos, mass, damping, t.fixed)
	}

	pub fn get_id(&self) -> usize {
		self.id
	}

	pub fn get_pos(&self) -> V2 {
		self.pos
	}

	pub fn get_orig_pos(&self) -> V2 {
		self.opos
	}

	pub fn get_velocity(&self) -> V2 {
		self.vel
	}

	pub fn get_accel(&self) -> V2 {
		self.accel
	}

	/// Displacement from the rest position, as of the last `clear`.
	pub fn get_diff(&self) -> V2 {
		self.diff
	}

	pub fn get_mass(&self) -> f32 {
		self.mass
	}

	pub fn get_damping(&self) -> f32 {
		self.damping
	}

	pub fn is_fixed(&self) -> bool {
		self.fixed
	}

	pub fn set_mass(&mut self, mass: f32) {
		self.mass = mass;
	}

	pub fn set_damping(&mut self, damping: f32) {
		self.damping = damping;
	}

	pub fn apply_force(&mut self, force: &V2) {
		vmath::add_scaled(
			self.accel.as_mut_slice(),
			force.as_slice(),
			1.0 / self.mass,
		);
	}

	pub fn update_velocity(&mut self) {
		vmath::add_assign(self.vel.as_mut_slice(), self.accel.as_slice());
	}

	/// Moves by the current velocity, capped at `max_dp` per step.
	pub fn update_position(&mut self, max_dp: f32) {
		if self.fixed {
			return;
		}
		let mut dp = self.vel;
		let l = vmath::l2_norm(dp.as_slice());
		if l > max_dp {
			vmath::scale(dp.as_mut_slice(), max_dp / l);
		}
		vmath::add_assign(self.pos.as_mut_slice(), dp.as_slice());
	}

	/// Ends the step. Returns true when the mass had diverged and was put
	/// back at rest.
	pub fn clear(&mut self) -> bool {
		vmath::scale(self.vel.as_mut_slice(), self.damping);
		self.accel.fill(0.0);
		let reset = !(finite(&self.pos) && finite(&self.vel));
		if reset {
			self.pos = self.opos;
			self.vel.fill(0.0);
		}
		vmath::sub_into(
			self.pos.as_slice(),
			self.opos.as_slice(),
			self.diff.as_mut_slice(),
		);
		reset
	}
}

fn finite(v: &V2) -> bool {
	v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod test {
	use super::*;
	use proptest::prelude::*;

	fn free_mass() -> Mass {
		Mass::new(0, V2::new(0.0, 0.5), 10.0, 0.5, false)
	}

	#[test]
	fn test_apply_force_divides_by_mass() {
		let mut m = free_mass();
		let f = V2::new(1.0, -2.0);
		m.apply_force(&f);
		m.apply_force(&f);
		assert!((m.get_accel() - V2::new(0.2, -0.4)).magnitude() < 1e-6);
		// the force vector is left untouched
		assert_eq!(f, V2::new(1.0, -2.0));
	}

	#[test]
	fn test_step_order() {
		let mut m = free_mass();
		m.apply_force(&V2::new(1.0, 0.0));
		m.update_velocity();
		m.update_position(f32::INFINITY);
		assert!(!m.clear());
		assert!((m.get_pos() - V2::new(0.1, 0.5)).magnitude() < 1e-6);
		assert!((m.get_velocity() - V2::new(0.05, 0.0)).magnitude() < 1e-6);
		assert!((m.get_diff() - V2::new(0.1, 0.0)).magnitude() < 1e-6);
		assert_eq!(m.get_orig_pos(), V2::new(0.0, 0.5));
	}

	#[test]
	fn test_clear_zeroes_accel() {
		let mut m = free_mass();
		m.apply_force(&V2::new(3.0, 4.0));
		m.clear();
		assert_eq!(m.get_accel(), V2::zeros());
		m.clear();
		assert_eq!(m.get_accel(), V2::zeros());
	}

	#[test]
	fn test_max_dp() {
		let mut m = Mass::new(0, V2::zeros(), 1.0, 1.0, false);
		m.apply_force(&V2::new(30.0, 40.0));
		m.update_velocity();
		m.update_position(0.5);
		m.clear();
		assert!((m.get_pos() - V2::new(0.3, 0.4)).magnitude() < 1e-6);
		// velocity itself is not clamped
		assert!((m.get_velocity() - V2::new(30.0, 40.0)).magnitude() < 1e-4);
	}

	#[test]
	fn test_diverged_mass_is_reset() {
		let mut m = free_mass();
		m.apply_force(&V2::new(f32::INFINITY, 0.0));
		m.update_velocity();
		m.update_position(f32::INFINITY);
		assert!(m.clear());
		assert_eq!(m.get_pos(), m.get_orig_pos());
		assert_eq!(m.get_velocity(), V2::zeros());
		assert_eq!(m.get_diff(), V2::zeros());
	}

	proptest! {
		#[test]
		fn fixed_mass_never_moves(
			fx in -1e6f32..1e6,
			fy in -1e6f32..1e6,
			steps in 1usize..50,
		) {
			let pos = V2::new(0.25, 0.75);
			let mut m = Mass::new(7, pos, 2.0, 0.999, true);
			for _ in 0..steps {
				m.apply_force(&V2::new(fx, fy));
				m.update_velocity();
				m.update_position(f32::INFINITY);
				m.clear();
				prop_assert_eq!(m.get_pos(), pos);
				prop_assert_eq!(m.get_diff(), V2::zeros());
			}
		}
	}
}
