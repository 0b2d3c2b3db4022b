// Copyright 2025 Irreducible Inc.

use gna_utils::ensure;

use crate::{Error, MatrixRef, VectorMut, VectorRef};

/// Entry `A[i][j]` of a symmetric band matrix stored as its lower band.
#[inline]
fn band_entry(band: MatrixRef<'_>, bandwidth: usize, i: usize, j: usize) -> f32 {
	if j <= i {
		band[(i, bandwidth + j - i)]
	} else {
		band[(j, bandwidth + i - j)]
	}
}

pub fn sbmv_accumulate(
	bandwidth: usize,
	band: MatrixRef<'_>,
	x: VectorRef<'_>,
	y: &mut VectorMut<'_>,
) -> Result<(), Error> {
	let n = y.len();
	ensure!(
		x.len() == n && band.rows() == n && band.cols() == bandwidth + 1,
		Error::DimensionMismatch(format!(
			"banded product of bandwidth {bandwidth} with band {:?}, x {}, y {n}",
			band.dim(),
			x.len()
		))
	);

	for i in 0..n {
		let lo = i.saturating_sub(bandwidth);
		let hi = (i + bandwidth).min(n - 1);
		let acc = (lo..=hi)
			.map(|j| band_entry(band, bandwidth, i, j) * x.get(j))
			.sum::<f32>();
		*y.get_mut(i) += acc;
	}
	Ok(())
}
