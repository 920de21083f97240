use fnv::FnvHashMap;
use protocol::pr_model::{PrMass, PrModel, PrSpring};

use crate::force::ForceEvent;
use crate::mass::Mass;
use crate::physical_model::{MeshParams, PhysicalModel};
use crate::spring::Spring;
use crate::vmath;
use crate::V2;

/// How a mesh step is reduced to one audio sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
	/// tanh of the summed L1 displacement of every mass.
	MeshL1,
	/// One axis of one mass's displacement, clamped to [-1, 1].
	Probe { id: usize, axis: usize },
}

/// Which masses may receive an external impulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikePolicy {
	AnyMass,
	FreeMassesOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reduce {
	MeshL1,
	Probe { index: usize, axis: usize },
}

#[derive(Clone, Debug)]
pub struct SpringMesh {
	masses: Vec<Mass>,
	springs: Vec<Spring>,
	struck: Option<usize>,
	reduce: Reduce,
	strike: StrikePolicy,
	max_dp: f32,
	resets: usize,
}

impl SpringMesh {
	/// Instantiates every spring of `model`. Masses are deduplicated by id
	/// and kept in order of first appearance.
	pub fn new(model: PhysicalModel, params: &MeshParams) -> Self {
		let mut index: FnvHashMap<usize, usize> = FnvHashMap::default();
		let mut masses: Vec<Mass> = Vec::new();
		let mut springs = Vec::with_capacity(model.springs.len());
		for st in model.springs.iter() {
			let ends = st.ms.map(|mt| {
				*index.entry(mt.id).or_insert_with(|| {
					masses.push(Mass::from_template(
						&mt,
						params.mass,
						params.damping,
					));
					masses.len() - 1
				})
			});
			springs.push(Spring::new(&masses, ends[0], ends[1], params.tension));
		}
		let reduce = match model.output {
			OutputMode::MeshL1 => Reduce::MeshL1,
			OutputMode::Probe { id, axis } => match index.get(&id) {
				Some(&idx) if axis < 2 => Reduce::Probe { index: idx, axis },
				_ => {
					tracing::warn!(id, axis, "probe not in mesh, summing all masses");
					Reduce::MeshL1
				}
			},
		};
		Self {
			masses,
			springs,
			struck: None,
			reduce,
			strike: model.strike,
			max_dp: f32::INFINITY,
			resets: 0,
		}
	}

	pub fn with_max_dp(mut self, max_dp: f32) -> Self {
		self.max_dp = max_dp;
		self
	}

	pub fn with_strike_policy(mut self, strike: StrikePolicy) -> Self {
		self.strike = strike;
		self
	}

	pub fn masses(&self) -> &[Mass] {
		&self.masses
	}

	pub fn springs(&self) -> &[Spring] {
		&self.springs
	}

	/// Index of the most recently struck mass.
	pub fn struck(&self) -> Option<usize> {
		self.struck
	}

	pub fn strike_policy(&self) -> StrikePolicy {
		self.strike
	}

	pub fn output_mode(&self) -> OutputMode {
		match self.reduce {
			Reduce::MeshL1 => OutputMode::MeshL1,
			Reduce::Probe { index, axis } => OutputMode::Probe {
				id: self.masses[index].get_id(),
				axis,
			},
		}
	}

	pub fn resets(&self) -> usize {
		self.resets
	}

	pub fn adjust_tension(&mut self, tension: f32) {
		for s in self.springs.iter_mut() {
			s.set_tension(tension);
		}
	}

	pub fn adjust_mass(&mut self, mass: f32) {
		for m in self.masses.iter_mut() {
			m.set_mass(mass);
		}
	}

	pub fn adjust_damping(&mut self, damping: f32) {
		for m in self.masses.iter_mut() {
			m.set_damping(damping);
		}
	}

	/// Index of the eligible mass closest to `location`; the first one in
	/// mass order wins a tie.
	pub fn find_nearest_mass(&self, location: &V2) -> Option<usize> {
		let mut nearest: Option<(usize, f32)> = None;
		for (idx, m) in self.masses.iter().enumerate() {
			if m.is_fixed() && self.strike == StrikePolicy::FreeMassesOnly {
				continue;
			}
			let dist = vmath::distance(m.get_pos().as_slice(), location.as_slice());
			if nearest.map_or(true, |(_, d)| dist < d) {
				nearest = Some((idx, dist));
			}
		}
		nearest.map(|(idx, _)| idx)
	}

	pub fn simulation_step(&mut self, force: Option<&ForceEvent>) -> f32 {
		if let Some(f) = force {
			if let Some(idx) = self.find_nearest_mass(&f.location) {
				self.masses[idx].apply_force(&f.force);
				self.struck = Some(idx);
			}
		}
		// all springs before any mass moves
		for spring in self.springs.iter_mut() {
			spring.update_forces(&mut self.masses);
		}
		for mass in self.masses.iter_mut() {
			mass.update_velocity();
			mass.update_position(self.max_dp);
			if mass.clear() {
				self.resets += 1;
			}
		}
		self.sample()
	}

	fn sample(&self) -> f32 {
		let sample = match self.reduce {
			Reduce::MeshL1 => {
				let mut total = 0f32;
				for m in self.masses.iter() {
					total += vmath::l1_norm(m.get_diff().as_slice());
				}
				total.tanh()
			}
			Reduce::Probe { index, axis } => {
				vmath::clamp(self.masses[index].get_diff()[axis], -1.0, 1.0)
			}
		};
		if sample.is_finite() {
			sample
		} else {
			0.0
		}
	}

	/// Summed speed of the free masses.
	pub fn residual_velocity(&self) -> f32 {
		self.masses
			.iter()
			.filter(|m| !m.is_fixed())
			.map(|m| vmath::l2_norm(m.get_velocity().as_slice()))
			.sum()
	}

	pub fn pr_model(&self) -> PrModel {
		let masses = self
			.masses
			.iter()
			.map(|m| PrMass {
				pos: m.get_pos().into(),
				fixed: m.is_fixed(),
			})
			.collect();
		let springs = self
			.springs
			.iter()
			.map(|s| {
				let [m1, m2] = s.endpoints();
				PrSpring {
					ends: [
						self.masses[m1].get_pos().into(),
						self.masses[m2].get_pos().into(),
					],
				}
			})
			.collect();
		PrModel {
			masses,
			springs,
			struck: self.struck.map(|idx| self.masses[idx].get_pos().into()),
		}
	}
}
