// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use tracing::instrument;

use super::{check_layout, check_len, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Applies an elementwise scale-and-bias, `output[i][j] = weight[i] * input[i][j] + bias[i]`.
///
/// Each input column is handed to the banded primitive with bandwidth 0 instead of running a
/// dense multiply against a mostly-zero matrix.
#[instrument(skip_all, level = "trace")]
pub fn apply_diagonal<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Diagonal(transform) = component.operation() else {
		return Err(operation_mismatch(OperationKind::Diagonal, component));
	};

	let m = component.rows_out();
	let n = component.cols_in();
	let (ldb, ldc) = (component.cols_in(), component.cols_out());

	let band = MatrixRef::new(transform.weights, m, 1, 1)?;
	let input = MatrixRef::new(buffers.inputs, m, n, ldb)?;
	check_len("biases", transform.biases, m)?;

	let mut output = MatrixMut::new(buffers.outputs, m, n, ldc)?;
	output.fill_rows(transform.biases);
	for j in 0..n {
		primitives.sbmv_accumulate(0, band, input.column(j), &mut output.column_mut(j))?;
	}
	Ok(())
}
