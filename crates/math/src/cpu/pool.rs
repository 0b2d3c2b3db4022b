// Copyright 2025 Irreducible Inc.

use gna_utils::ensure;

use crate::{Error, PoolParams};

pub fn max_pool(params: &PoolParams, input: &[f32], output: &mut [f32]) -> Result<(), Error> {
	let num_channels = params.num_channels;
	ensure!(
		num_channels != 0 && input.len() % num_channels == 0,
		Error::DimensionMismatch(format!(
			"pooling input of {} elements is not a whole number of {num_channels}-channel positions",
			input.len()
		))
	);

	let num_positions = input.len() / num_channels;
	let num_windows = params.num_windows(num_positions)?;
	ensure!(
		output.len() >= num_windows * num_channels,
		Error::IncorrectArgumentLength {
			arg: "output".into(),
			expected: num_windows * num_channels,
			actual: output.len(),
		}
	);

	for window in 0..num_windows {
		let start = window * params.pool_stride;
		let end = (start + params.pool_size).min(num_positions);
		for channel in 0..num_channels {
			output[window * num_channels + channel] = (start..end)
				.map(|position| input[position * num_channels + channel])
				.fold(f32::NEG_INFINITY, f32::max);
		}
	}
	Ok(())
}
