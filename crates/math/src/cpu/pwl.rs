// Copyright 2025 Irreducible Inc.

use gna_utils::ensure;

use crate::{Error, MatrixMut, MatrixRef, PwlSegment};

/// Evaluates the activation at `x`. `segments` must be non-empty and sorted by `x_base`.
#[inline]
fn eval_segments(segments: &[PwlSegment], x: f32) -> f32 {
	match segments.partition_point(|segment| segment.x_base <= x) {
		0 => segments[0].y_base,
		idx => segments[idx - 1].eval(x),
	}
}

pub fn piecewise_linear(
	segments: &[PwlSegment],
	input: MatrixRef<'_>,
	output: &mut MatrixMut<'_>,
) -> Result<(), Error> {
	ensure!(!segments.is_empty(), Error::EmptySegmentTable);
	ensure!(
		input.dim() == output.dim(),
		Error::DimensionMismatch(format!(
			"activation input {:?} and output {:?}",
			input.dim(),
			output.dim()
		))
	);

	for i in 0..input.rows() {
		for (y, &x) in output.row_mut(i).iter_mut().zip(input.row(i)) {
			*y = eval_segments(segments, x);
		}
	}
	Ok(())
}
