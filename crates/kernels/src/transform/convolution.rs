// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use tracing::instrument;

use super::{check_layout, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Applies a 1-D convolution to every input row.
///
/// Input row `r` (stride `cols_in`) is convolved with the filter bank into output row `r`
/// (stride `cols_out`), laid out as `[position][filter]`.
#[instrument(skip_all, level = "trace")]
pub fn apply_convolution_1d<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Convolution1D(conv) = component.operation() else {
		return Err(operation_mismatch(OperationKind::Convolution1D, component));
	};

	let rows = component.rows_in();
	let filters = MatrixRef::dense(conv.filters, conv.num_filters, conv.num_filter_coefficients)?;
	let inputs = MatrixRef::new(buffers.inputs, rows, component.cols_in(), component.cols_in())?;
	let mut outputs =
		MatrixMut::new(buffers.outputs, rows, component.cols_out(), component.cols_out())?;

	for r in 0..rows {
		primitives.convolve_1d(&conv.params, filters, conv.biases, inputs.row(r), outputs.row_mut(r))?;
	}
	Ok(())
}
