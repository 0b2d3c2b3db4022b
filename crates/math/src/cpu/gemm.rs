// Copyright 2025 Irreducible Inc.

use gna_utils::ensure;
use itertools::izip;

use crate::{Error, MatrixMut, MatrixRef};

fn dot(lhs: &[f32], rhs: &[f32]) -> f32 {
	lhs.iter().zip(rhs).map(|(&l, &r)| l * r).sum()
}

/// `c_row += a_row · B`, walking `B` row by row so that every access is contiguous.
fn accumulate_row(a_row: &[f32], b: MatrixRef<'_>, c_row: &mut [f32]) {
	for (k, &a_ik) in a_row.iter().enumerate() {
		for (c_ij, &b_kj) in c_row.iter_mut().zip(b.row(k)) {
			*c_ij += a_ik * b_kj;
		}
	}
}

pub fn gemm_accumulate(a: MatrixRef<'_>, b: MatrixRef<'_>, c: &mut MatrixMut<'_>) -> Result<(), Error> {
	ensure!(
		a.cols() == b.rows() && a.rows() == c.rows() && b.cols() == c.cols(),
		Error::DimensionMismatch(format!(
			"gemm with A {:?}, B {:?}, C {:?}",
			a.dim(),
			b.dim(),
			c.dim()
		))
	);

	for i in 0..c.rows() {
		accumulate_row(a.row(i), b, c.row_mut(i));
	}
	Ok(())
}

pub fn gemm_subset_accumulate(
	a: MatrixRef<'_>,
	b: MatrixRef<'_>,
	c: &mut MatrixMut<'_>,
	rows: &[u32],
) -> Result<(), Error> {
	ensure!(
		a.cols() == b.rows() && rows.len() <= c.rows() && b.cols() == c.cols(),
		Error::DimensionMismatch(format!(
			"subset gemm of {} rows with A {:?}, B {:?}, C {:?}",
			rows.len(),
			a.dim(),
			b.dim(),
			c.dim()
		))
	);

	for (l, &i) in rows.iter().enumerate() {
		accumulate_row(a.row(i as usize), b, c.row_mut(l));
	}
	Ok(())
}

pub fn gemv_split(
	weights: MatrixRef<'_>,
	bias: &[f32],
	x1: &[f32],
	x2: &[f32],
	y: &mut [f32],
) -> Result<(), Error> {
	let k1 = x1.len();
	ensure!(
		weights.rows() == y.len() && weights.cols() == k1 + x2.len() && bias.len() >= y.len(),
		Error::DimensionMismatch(format!(
			"split gemv with W {:?}, inputs {k1} + {}, output {}",
			weights.dim(),
			x2.len(),
			y.len()
		))
	);

	for (y_i, row, &b) in izip!(y.iter_mut(), weights.iter_rows(), bias) {
		let (w1, w2) = row.split_at(k1);
		*y_i = b + dot(w1, x1) + dot(w2, x2);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::iter::repeat_with;

	use assert_matches::assert_matches;
	use proptest::prelude::*;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;

	fn naive_gemm(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
		let mut c = vec![0.0; m * n];
		for i in 0..m {
			for j in 0..n {
				for l in 0..k {
					c[i * n + j] += a[i * k + l] * b[l * n + j];
				}
			}
		}
		c
	}

	proptest! {
		#[test]
		fn test_gemm_matches_naive(m in 1..6usize, k in 1..6usize, n in 1..6usize, seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			// Small integers keep every product and sum exact.
			let mut random = |len: usize| {
				repeat_with(|| rng.gen_range(-8i32..8) as f32).take(len).collect::<Vec<_>>()
			};
			let a = random(m * k);
			let b = random(k * n);

			let mut c = vec![0.0; m * n];
			gemm_accumulate(
				MatrixRef::dense(&a, m, k).unwrap(),
				MatrixRef::dense(&b, k, n).unwrap(),
				&mut MatrixMut::dense(&mut c, m, n).unwrap(),
			)
			.unwrap();
			prop_assert_eq!(c, naive_gemm(&a, &b, m, k, n));
		}
	}

	#[test]
	fn test_gemm_accumulates_on_seed() {
		let a = [1.0, 2.0, 3.0, 4.0];
		let b = [5.0, 6.0, 7.0, 8.0];
		let mut c = [1.0, 1.0, 1.0, 1.0];
		gemm_accumulate(
			MatrixRef::dense(&a, 2, 2).unwrap(),
			MatrixRef::dense(&b, 2, 2).unwrap(),
			&mut MatrixMut::dense(&mut c, 2, 2).unwrap(),
		)
		.unwrap();
		assert_eq!(c, [20.0, 23.0, 44.0, 51.0]);
	}

	#[test]
	fn test_gemm_respects_output_stride() {
		let a = [2.0];
		let b = [1.0, 2.0];
		let mut c = [0.0, 0.0, 9.0];
		gemm_accumulate(
			MatrixRef::dense(&a, 1, 1).unwrap(),
			MatrixRef::dense(&b, 1, 2).unwrap(),
			&mut MatrixMut::new(&mut c, 1, 2, 3).unwrap(),
		)
		.unwrap();
		assert_eq!(c, [2.0, 4.0, 9.0]);
	}

	#[test]
	fn test_gemm_dimension_mismatch() {
		let a = [0.0; 6];
		let b = [0.0; 6];
		let mut c = [0.0; 4];
		assert_matches!(
			gemm_accumulate(
				MatrixRef::dense(&a, 2, 3).unwrap(),
				MatrixRef::dense(&b, 2, 3).unwrap(),
				&mut MatrixMut::dense(&mut c, 2, 2).unwrap(),
			),
			Err(Error::DimensionMismatch(_))
		);
	}

	#[test]
	fn test_subset_writes_compacted() {
		// A selects row 2 then row 0; results land in rows 0 and 1 of C.
		let a = [1.0, 10.0, 100.0];
		let b = [3.0];
		let mut c = [0.0, 0.0, -1.0];
		gemm_subset_accumulate(
			MatrixRef::dense(&a, 3, 1).unwrap(),
			MatrixRef::dense(&b, 1, 1).unwrap(),
			&mut MatrixMut::dense(&mut c, 3, 1).unwrap(),
			&[2, 0],
		)
		.unwrap();
		assert_eq!(c, [300.0, 3.0, -1.0]);
	}

	#[test]
	fn test_gemv_split() {
		let weights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
		let mut y = [0.0; 2];
		gemv_split(MatrixRef::dense(&weights, 2, 3).unwrap(), &[0.5, -0.5], &[1.0, 1.0], &[2.0], &mut y)
			.unwrap();
		assert_eq!(y, [9.5, 20.5]);
	}
}
