// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef};
use tracing::instrument;

use super::{check_layout, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Transposes the `rows_in x cols_in` input into a `cols_in x rows_in` output with row stride
/// `cols_out`.
#[instrument(skip_all, level = "trace")]
pub fn apply_transpose(component: &Component<'_>, buffers: ComponentBuffers<'_>) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Transpose = component.operation() else {
		return Err(operation_mismatch(OperationKind::Transpose, component));
	};

	let m = component.rows_in();
	let n = component.cols_in();
	let (lda, ldb) = (component.cols_in(), component.cols_out());

	let a = MatrixRef::new(buffers.inputs, m, n, lda)?;
	let mut b = MatrixMut::new(buffers.outputs, n, m, ldb)?;
	for (row, a_row) in a.iter_rows().enumerate() {
		for (col, &value) in a_row.iter().enumerate() {
			b[(col, row)] = value;
		}
	}
	Ok(())
}
