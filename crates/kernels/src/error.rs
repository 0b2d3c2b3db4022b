// Copyright 2025 Irreducible Inc.

use crate::component::{NumberType, OperationKind};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("bad data width: {bytes_per_input} bytes per element, expected 4")]
	InvalidLayout { bytes_per_input: usize },
	#[error("recurrent component has no feedback buffer")]
	MissingFeedback,
	#[error("attempt to copy {requested} rows from a matrix with {available} rows")]
	CopyOutOfBounds { requested: usize, available: usize },
	#[error("bad number type: {0:?}")]
	UnsupportedNumericType(NumberType),
	#[error("{expected:?} kernel invoked on a {actual:?} component")]
	OperationMismatch {
		expected: OperationKind,
		actual: OperationKind,
	},
	#[error("{operation:?} component does not support {selection} row selection")]
	UnsupportedRowSelection {
		operation: OperationKind,
		selection: &'static str,
	},
	#[error("active row {row} is out of range for {rows} rows")]
	ActiveRowOutOfRange { row: usize, rows: usize },
	#[error("buffer cannot be viewed as f32 elements: {0}")]
	UnalignedBuffer(bytemuck::PodCastError),
	#[error("{0}")]
	Math(#[from] gna_math::Error),
}
