// Copyright 2025 Irreducible Inc.

use gna_utils::ensure;
use itertools::izip;

use crate::{ConvolutionParams, Error, MatrixRef};

pub fn convolve_1d(
	params: &ConvolutionParams,
	filters: MatrixRef<'_>,
	biases: &[f32],
	input: &[f32],
	output: &mut [f32],
) -> Result<(), Error> {
	let num_filters = filters.rows();
	let num_coefficients = filters.cols();
	ensure!(
		biases.len() >= num_filters,
		Error::IncorrectArgumentLength {
			arg: "biases".into(),
			expected: num_filters,
			actual: biases.len(),
		}
	);

	let num_positions = params.num_positions(num_coefficients, input.len())?;
	ensure!(
		output.len() >= num_positions * num_filters,
		Error::IncorrectArgumentLength {
			arg: "output".into(),
			expected: num_positions * num_filters,
			actual: output.len(),
		}
	);

	for position in 0..num_positions {
		let start = position * params.feature_map_stride;
		let window = &input[start..start + num_coefficients];
		let out = &mut output[position * num_filters..(position + 1) * num_filters];
		for (out_f, filter, &bias) in izip!(out.iter_mut(), filters.iter_rows(), biases) {
			*out_f = bias + izip!(filter, window).map(|(&w, &x)| w * x).sum::<f32>();
		}
	}
	Ok(())
}
