// Copyright 2025 Irreducible Inc.

use tracing::warn;

use crate::error::Error;

/// Lower bound applied to the softmax normalizer before taking its logarithm.
pub const MIN_NORMALIZER: f32 = 1e-20;

/// Writes the log-softmax of `input` into `output`.
///
/// Every output is `(input[i] - max) - ln(sum_j exp(input[j] - max))`, where the sum and the
/// maximum run over all of `input`. The maximum is subtracted before the log-normalizer so the
/// result keeps its precision however large `|max|` is. Only the first `output.len()` inputs are written, so the
/// output may be shorter than the input but not longer.
///
/// ## Throws
///
/// * [`Error::TooManyOutputs`] if `output` is longer than `input`
pub fn stable_softmax(input: &[f32], output: &mut [f32]) -> Result<(), Error> {
	if output.len() > input.len() {
		return Err(Error::TooManyOutputs {
			num_outputs: output.len(),
			num_inputs: input.len(),
		});
	}
	if input.is_empty() {
		return Ok(());
	}

	let max = input.iter().copied().fold(f32::NEG_INFINITY, f32::max);
	let sum = input.iter().map(|&x| (x - max).exp()).sum::<f32>();
	let log_sum = clamped_log_sum(sum);

	for (out, &x) in output.iter_mut().zip(input) {
		*out = (x - max) - log_sum;
	}
	Ok(())
}

fn clamped_log_sum(sum: f32) -> f32 {
	let sum = if sum < MIN_NORMALIZER {
		warn!(sum, "softmax normalizer underflowed, clamping before log");
		MIN_NORMALIZER
	} else {
		sum
	};
	sum.ln()
}
