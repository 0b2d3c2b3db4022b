// Copyright 2025 Irreducible Inc.

use gna_math::strided_len;
use gna_utils::ensure;
use tracing::instrument;

use super::{check_layout, check_len, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Copies a `num_copy_rows x num_copy_columns` block from the input (row stride `cols_in`) to
/// the output (row stride `cols_out`).
///
/// Only the row count is checked against the declared input shape. The column count is taken
/// as given and may run past `cols_in`.
///
/// ## Throws
///
/// * [`Error::InvalidLayout`] if the element width is not 4 bytes
/// * [`Error::CopyOutOfBounds`] if more rows are requested than the input has
#[instrument(skip_all, level = "trace")]
pub fn apply_copy(component: &Component<'_>, buffers: ComponentBuffers<'_>) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Copy(extent) = component.operation() else {
		return Err(operation_mismatch(OperationKind::Copy, component));
	};

	let m = extent.num_copy_rows;
	let n = extent.num_copy_columns;
	let (lda, ldb) = (component.cols_in(), component.cols_out());
	ensure!(
		m <= component.rows_in(),
		Error::CopyOutOfBounds {
			requested: m,
			available: component.rows_in(),
		}
	);
	if n == 0 {
		return Ok(());
	}
	check_len("inputs", buffers.inputs, strided_len(m, n, lda))?;
	check_len("outputs", buffers.outputs, strided_len(m, n, ldb))?;

	for row in 0..m {
		let src = &buffers.inputs[row * lda..row * lda + n];
		buffers.outputs[row * ldb..row * ldb + n].copy_from_slice(src);
	}
	Ok(())
}
