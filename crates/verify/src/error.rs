// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected}, got {actual}")]
	IncorrectArgumentLength {
		arg: String,
		expected: usize,
		actual: usize,
	},
	#[error("cannot produce {num_outputs} outputs from {num_inputs} inputs")]
	TooManyOutputs {
		num_outputs: usize,
		num_inputs: usize,
	},
}
