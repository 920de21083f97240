use fnv::FnvHashSet;
use protocol::command::ModelType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::mass::MassTemplate;
use crate::mesh::{OutputMode, SpringMesh, StrikePolicy};
use crate::spring::SpringTemplate;
use crate::V2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshParams {
	pub mass: f32,
	pub tension: f32,
	pub damping: f32,
}

impl Default for MeshParams {
	fn default() -> Self {
		Self {
			mass: 10.0,
			tension: 0.5,
			damping: 0.9998,
		}
	}
}

/// Topology of a mesh before any mass is instantiated.
#[derive(Clone, Debug)]
pub struct PhysicalModel {
	pub springs: Vec<SpringTemplate>,
	pub output: OutputMode,
	pub strike: StrikePolicy,
	pub params: MeshParams,
}

impl PhysicalModel {
	/// A chain of `n` masses along the second axis, both ends pinned.
	pub fn string(n: usize) -> Self {
		Self {
			springs: chain(0, n, 0.0),
			output: OutputMode::MeshL1,
			strike: StrikePolicy::AnyMass,
			params: MeshParams::default(),
		}
	}

	/// A `width` x `width` grid with the border pinned and springs between
	/// axis-adjacent nodes only.
	#[allow(clippy::needless_range_loop)]
	pub fn plate(width: usize) -> Self {
		let w = width as f32;
		let mut ms = vec![];
		for i in 0..width {
			for j in 0..width {
				let fixed = i == 0 || j == 0 || i + 1 == width || j + 1 == width;
				let pos = V2::new(i as f32 / w, j as f32 / w);
				ms.push(MassTemplate::new(i * width + j, pos, fixed));
			}
		}
		let mut seen = FnvHashSet::default();
		let mut springs = vec![];
		for i in 0..width {
			for j in 0..width {
				let neighbors = [
					(i.wrapping_sub(1), j),
					(i + 1, j),
					(i, j.wrapping_sub(1)),
					(i, j + 1),
				];
				for (ni, nj) in neighbors {
					if ni >= width || nj >= width {
						continue;
					}
					let a = i * width + j;
					let b = ni * width + nj;
					if seen.insert((a.min(b), a.max(b))) {
						springs.push(SpringTemplate::new(ms[a], ms[b]));
					}
				}
			}
		}
		let c = width / 2;
		let output = if width >= 3 {
			OutputMode::Probe {
				id: c * width + c,
				axis: 0,
			}
		} else {
			OutputMode::MeshL1
		};
		Self {
			springs,
			output,
			strike: StrikePolicy::FreeMassesOnly,
			params: MeshParams {
				mass: 20.0,
				tension: 0.1,
				damping: 0.9998,
			},
		}
	}

	/// `n` masses scattered over the unit square, each wired to `k` random
	/// partners. The first `pinned` masses are fixed.
	pub fn random(n: usize, k: usize, pinned: usize, seed: u64) -> Self {
		let mut rng = StdRng::seed_from_u64(seed);
		let ms: Vec<MassTemplate> = (0..n)
			.map(|id| {
				let pos = V2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
				MassTemplate::new(id, pos, id < pinned)
			})
			.collect();
		let mut seen = FnvHashSet::default();
		let mut springs = vec![];
		if n >= 2 {
			for a in 0..n {
				for _ in 0..k {
					// skip over `a` so there are no self springs
					let mut b = rng.gen_range(0..n - 1);
					if b >= a {
						b += 1;
					}
					if seen.insert((a.min(b), a.max(b))) {
						springs.push(SpringTemplate::new(ms[a], ms[b]));
					}
				}
			}
		}
		let output = if pinned < n {
			OutputMode::Probe {
				id: pinned,
				axis: 0,
			}
		} else {
			OutputMode::MeshL1
		};
		Self {
			springs,
			output,
			strike: StrikePolicy::AnyMass,
			params: MeshParams::default(),
		}
	}

	/// `strings` parallel strings of `n` masses each, every string pinned at
	/// both ends.
	pub fn multi_string(strings: usize, n: usize) -> Self {
		let mut springs = vec![];
		for s in 0..strings {
			let x = (s + 1) as f32 / (strings + 1) as f32;
			springs.extend(chain(s * n, n, x));
		}
		Self {
			springs,
			output: OutputMode::MeshL1,
			strike: StrikePolicy::FreeMassesOnly,
			params: MeshParams::default(),
		}
	}
}

fn chain(first_id: usize, n: usize, x: f32) -> Vec<SpringTemplate> {
	let ms: Vec<MassTemplate> = (0..n)
		.map(|i| {
			let pos = V2::new(x, i as f32 / n as f32);
			MassTemplate::new(first_id + i, pos, i == 0 || i + 1 == n)
		})
		.collect();
	ms.windows(2)
		.map(|w| SpringTemplate::new(w[0], w[1]))
		.collect()
}

/// Sizes used when a topology is selected by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
	pub string_masses: usize,
	pub plate_width: usize,
	pub random_masses: usize,
	pub random_connections: usize,
	pub random_pinned: usize,
	pub seed: u64,
	pub strings: usize,
	pub string_masses_per_string: usize,
}

impl Default for TopologyConfig {
	fn default() -> Self {
		Self {
			string_masses: 64,
			plate_width: 16,
			random_masses: 64,
			random_connections: 3,
			random_pinned: 4,
			seed: 0,
			strings: 4,
			string_masses_per_string: 32,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Topology {
	String { n: usize },
	Plate { width: usize },
	Random {
		n: usize,
		connections: usize,
		pinned: usize,
		seed: u64,
	},
	MultiString { strings: usize, n: usize },
}

impl Topology {
	pub fn from_model_type(ty: ModelType, config: &TopologyConfig) -> Self {
		match ty {
			ModelType::String => Topology::String {
				n: config.string_masses,
			},
			ModelType::Plate => Topology::Plate {
				width: config.plate_width,
			},
			ModelType::Random => Topology::Random {
				n: config.random_masses,
				connections: config.random_connections,
				pinned: config.random_pinned,
				seed: config.seed,
			},
			ModelType::MultiString => Topology::MultiString {
				strings: config.strings,
				n: config.string_masses_per_string,
			},
		}
	}

	pub fn physical_model(&self) -> PhysicalModel {
		match *self {
			Topology::String { n } => PhysicalModel::string(n),
			Topology::Plate { width } => PhysicalModel::plate(width),
			Topology::Random {
				n,
				connections,
				pinned,
				seed,
			} => PhysicalModel::random(n, connections, pinned, seed),
			Topology::MultiString { strings, n } => {
				PhysicalModel::multi_string(strings, n)
			}
		}
	}

	/// Builds the mesh with the topology's own default parameters.
	pub fn build(&self) -> SpringMesh {
		let model = self.physical_model();
		let params = model.params;
		SpringMesh::new(model, &params)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn key(s: &crate::spring::Spring) -> (usize, usize) {
		let [a, b] = s.endpoints();
		(a.min(b), a.max(b))
	}

	#[test]
	fn test_string() {
		let mesh = Topology::String { n: 4 }.build();
		let fixed: Vec<bool> = mesh.masses().iter().map(|m| m.is_fixed()).collect();
		assert_eq!(fixed, vec![true, false, false, true]);
		assert_eq!(mesh.springs().len(), 3);
		assert_eq!(mesh.masses()[2].get_pos(), V2::new(0.0, 0.5));
		assert_eq!(mesh.output_mode(), OutputMode::MeshL1);
		assert_eq!(mesh.strike_policy(), StrikePolicy::AnyMass);
	}

	#[test]
	fn test_plate_width_8() {
		let width = 8;
		let mesh = Topology::Plate { width }.build();
		assert_eq!(mesh.masses().len(), width * width);
		for m in mesh.masses() {
			let (i, j) = (m.get_id() / width, m.get_id() % width);
			let border = i == 0 || i == width - 1 || j == 0 || j == width - 1;
			assert_eq!(m.is_fixed(), border, "node ({}, {})", i, j);
		}
		let mut keys = FnvHashSet::default();
		for s in mesh.springs() {
			let [a, b] = s.endpoints();
			let ia = mesh.masses()[a].get_id();
			let ib = mesh.masses()[b].get_id();
			let (ai, aj) = ((ia / width) as i64, (ia % width) as i64);
			let (bi, bj) = ((ib / width) as i64, (ib % width) as i64);
			assert_eq!((ai - bi).abs() + (aj - bj).abs(), 1);
			assert!(keys.insert(key(s)));
		}
		// every axis-adjacent pair exactly once
		assert_eq!(mesh.springs().len(), 2 * width * (width - 1));
		assert_eq!(mesh.strike_policy(), StrikePolicy::FreeMassesOnly);
		assert_eq!(
			mesh.output_mode(),
			OutputMode::Probe {
				id: 4 * width + 4,
				axis: 0
			}
		);
		assert_eq!(mesh.masses()[0].get_mass(), 20.0);
		assert_eq!(mesh.springs()[0].get_tension(), 0.1);
	}

	#[test]
	fn test_plate_strike_skips_border() {
		let mesh = Topology::Plate { width: 8 }.build();
		let idx = mesh.find_nearest_mass(&V2::new(0.0, 0.0)).unwrap();
		assert_eq!(mesh.masses()[idx].get_id(), 9);
	}

	#[test]
	fn test_random_deterministic() {
		let t = Topology::Random {
			n: 32,
			connections: 3,
			pinned: 4,
			seed: 7,
		};
		let a = t.build();
		let b = t.build();
		assert_eq!(a.pr_model(), b.pr_model());
		let mut keys = FnvHashSet::default();
		for s in a.springs() {
			let [m1, m2] = s.endpoints();
			assert_ne!(m1, m2);
			assert!(keys.insert(key(s)));
		}
		// every mass has at least its own springs
		assert_eq!(a.masses().len(), 32);
		for m in a.masses() {
			assert_eq!(m.is_fixed(), m.get_id() < 4);
			let p = m.get_pos();
			assert!((0.0..1.0).contains(&p[0]) && (0.0..1.0).contains(&p[1]));
		}
		assert_eq!(a.output_mode(), OutputMode::Probe { id: 4, axis: 0 });
	}

	#[test]
	fn test_random_single_mass() {
		let mesh = Topology::Random {
			n: 1,
			connections: 3,
			pinned: 0,
			seed: 0,
		}
		.build();
		assert!(mesh.masses().is_empty());
		assert_eq!(mesh.output_mode(), OutputMode::MeshL1);
	}

	#[test]
	fn test_multi_string() {
		let mesh = Topology::MultiString { strings: 3, n: 5 }.build();
		assert_eq!(mesh.masses().len(), 15);
		assert_eq!(mesh.springs().len(), 12);
		let pinned = mesh.masses().iter().filter(|m| m.is_fixed()).count();
		assert_eq!(pinned, 6);
		assert_eq!(mesh.masses()[5].get_pos(), V2::new(0.5, 0.0));
		assert_eq!(mesh.strike_policy(), StrikePolicy::FreeMassesOnly);
	}

	#[test]
	fn test_from_model_type() {
		let config = TopologyConfig::default();
		assert_eq!(
			Topology::from_model_type(ModelType::Plate, &config),
			Topology::Plate { width: 16 }
		);
		let mesh = Topology::from_model_type(ModelType::MultiString, &config).build();
		assert_eq!(mesh.masses().len(), 4 * 32);
	}
}
