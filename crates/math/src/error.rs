// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected}, got {actual}")]
	IncorrectArgumentLength {
		arg: String,
		expected: usize,
		actual: usize,
	},
	#[error("leading dimension {ld} is smaller than the column count {cols}")]
	LeadingDimensionTooSmall { ld: usize, cols: usize },
	#[error("stride must be non-zero")]
	ZeroStride,
	#[error("operand dimensions do not match: {0}")]
	DimensionMismatch(String),
	#[error("the piecewise-linear segment table is empty")]
	EmptySegmentTable,
	#[error("filter with {num_coefficients} coefficients does not fit an input of {input_len}")]
	FilterLongerThanInput {
		num_coefficients: usize,
		input_len: usize,
	},
}
