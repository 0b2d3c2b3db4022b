// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use gna_utils::ensure;
use tracing::instrument;

use super::{check_layout, check_len, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Runs a single time step of a recurrent layer for input row `row`.
///
/// The row's `cols_in` inputs are concatenated with the `cols_out` `feedbacks` (the previous
/// step's output) and fed through the `cols_out x (cols_in + cols_out)` weight matrix. The
/// result is written to output row `row`.
///
/// ## Throws
///
/// * [`Error::InvalidLayout`] if the element width is not 4 bytes
/// * [`Error::MissingFeedback`] if `feedbacks` is `None`
/// * [`Error::ActiveRowOutOfRange`] if `row` is not a row of both the input and the output
#[instrument(skip_all, level = "trace", fields(row = row))]
pub fn apply_recurrent<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
	row: usize,
	feedbacks: Option<&[f32]>,
) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Recurrent(transform) = component.operation() else {
		return Err(operation_mismatch(OperationKind::Recurrent, component));
	};
	let feedbacks = feedbacks.ok_or(Error::MissingFeedback)?;

	let rows = component.rows_in().min(component.rows_out());
	ensure!(row < rows, Error::ActiveRowOutOfRange { row, rows });

	let k1 = component.cols_in();
	let k2 = component.cols_out();
	check_len("feedbacks", feedbacks, k2)?;

	let weights = MatrixRef::new(transform.weights, k2, k1 + k2, k1 + k2)?;
	let inputs = MatrixRef::new(buffers.inputs, component.rows_in(), k1, k1)?;
	let mut outputs = MatrixMut::new(buffers.outputs, component.rows_out(), k2, k2)?;

	primitives.gemv_split(
		weights,
		transform.biases,
		inputs.row(row),
		&feedbacks[..k2],
		outputs.row_mut(row),
	)?;
	Ok(())
}
