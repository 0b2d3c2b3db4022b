// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use tracing::instrument;

use super::{check_layout, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Applies max pooling to every input row, each laid out as `[position][channel]`.
#[instrument(skip_all, level = "trace")]
pub fn apply_max_pool<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::MaxPool(params) = component.operation() else {
		return Err(operation_mismatch(OperationKind::MaxPool, component));
	};

	let rows = component.rows_in();
	let inputs = MatrixRef::new(buffers.inputs, rows, component.cols_in(), component.cols_in())?;
	let mut outputs =
		MatrixMut::new(buffers.outputs, rows, component.cols_out(), component.cols_out())?;

	for r in 0..rows {
		primitives.max_pool(params, inputs.row(r), outputs.row_mut(r))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use gna_math::{CpuPrimitives, PoolParams};

	use super::*;
	use crate::component::Shape;

	fn component(cols_out: usize) -> Component<'static> {
		Component::new(
			Shape::new(1, 4, 1, cols_out),
			Operation::MaxPool(PoolParams {
				pool_size: 2,
				pool_stride: 2,
				num_channels: 1,
			}),
		)
	}

	#[test]
	fn test_pairs() {
		let inputs = [1.0, -4.0, 0.5, 0.25];
		let mut outputs = [0.0; 2];
		apply_max_pool(&CpuPrimitives, &component(2), ComponentBuffers::new(&inputs, &mut outputs))
			.unwrap();
		assert_eq!(outputs, [1.0, 0.5]);
	}

	#[test]
	fn test_output_row_too_narrow() {
		let inputs = [0.0; 4];
		let mut outputs = [0.0; 1];
		assert_matches!(
			apply_max_pool(&CpuPrimitives, &component(1), ComponentBuffers::new(&inputs, &mut outputs)),
			Err(Error::Math(gna_math::Error::IncorrectArgumentLength { expected: 2, .. }))
		);
	}
}
