//! Fixed-length vector helpers for the per-sample path.
//!
//! Every function writes into a buffer owned by the caller, so nothing here
//! allocates. All slices passed to one call must have the same length.

pub fn sub_into(a: &[f32], b: &[f32], out: &mut [f32]) {
	for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
		*o = x - y;
	}
}

pub fn add_into(a: &[f32], b: &[f32], out: &mut [f32]) {
	for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
		*o = x + y;
	}
}

pub fn add_assign(acc: &mut [f32], b: &[f32]) {
	for (o, x) in acc.iter_mut().zip(b) {
		*o += x;
	}
}

/// `acc += b * k`
pub fn add_scaled(acc: &mut [f32], b: &[f32], k: f32) {
	for (o, x) in acc.iter_mut().zip(b) {
		*o += x * k;
	}
}

/// `v = a - v`
pub fn rsub_assign(v: &mut [f32], a: &[f32]) {
	for (o, x) in v.iter_mut().zip(a) {
		*o = x - *o;
	}
}

pub fn scale(v: &mut [f32], k: f32) {
	for o in v.iter_mut() {
		*o *= k;
	}
}

pub fn div(v: &mut [f32], k: f32) {
	for o in v.iter_mut() {
		*o /= k;
	}
}

pub fn sum(v: &[f32]) -> f32 {
	let mut total = 0f32;
	for x in v {
		total += x;
	}
	total
}

pub fn l1_norm(v: &[f32]) -> f32 {
	let mut norm = 0f32;
	for x in v {
		norm += x.abs();
	}
	norm
}

pub fn l2_norm(v: &[f32]) -> f32 {
	let mut norm = 0f32;
	for x in v {
		norm += x * x;
	}
	norm.sqrt()
}

pub fn distance(a: &[f32], b: &[f32]) -> f32 {
	let mut d = 0f32;
	for (x, y) in a.iter().zip(b) {
		d += (x - y) * (x - y);
	}
	d.sqrt()
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
	if value < min {
		return min;
	}
	if value > max {
		return max;
	}
	value
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_elementwise() {
		let a = [1.0, -2.0];
		let b = [0.5, 0.5];
		let mut out = [0.0; 2];
		sub_into(&a, &b, &mut out);
		assert_eq!(out, [0.5, -2.5]);
		add_into(&a, &b, &mut out);
		assert_eq!(out, [1.5, -1.5]);
		add_assign(&mut out, &b);
		assert_eq!(out, [2.0, -1.0]);
		add_scaled(&mut out, &a, 2.0);
		assert_eq!(out, [4.0, -5.0]);
		rsub_assign(&mut out, &b);
		assert_eq!(out, [-3.5, 5.5]);
		scale(&mut out, 2.0);
		assert_eq!(out, [-7.0, 11.0]);
		div(&mut out, 4.0);
		assert_eq!(out, [-1.75, 2.75]);
	}

	#[test]
	fn test_norms() {
		let v = [3.0, -4.0];
		assert_eq!(sum(&v), -1.0);
		assert_eq!(l1_norm(&v), 7.0);
		assert!((l2_norm(&v) - 5.0).abs() < 1e-6);
		assert!((distance(&[1.0, 1.0], &[4.0, 5.0]) - 5.0).abs() < 1e-6);
		assert_eq!(l2_norm(&[]), 0.0);
	}

	#[test]
	fn test_clamp() {
		assert_eq!(clamp(2.0, -1.0, 1.0), 1.0);
		assert_eq!(clamp(-2.0, -1.0, 1.0), -1.0);
		assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
	}
}
