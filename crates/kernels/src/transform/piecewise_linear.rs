// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use gna_utils::ensure;
use tracing::instrument;

use super::operation_mismatch;
use crate::{
	buffers::ComponentBuffers,
	component::{Component, NumberType, Operation, OperationKind, PiecewiseLinear},
	error::Error,
};

fn activation<'c, 'a>(
	component: &'c Component<'a>,
	number_type: NumberType,
) -> Result<&'c PiecewiseLinear<'a>, Error> {
	ensure!(number_type == NumberType::Float, Error::UnsupportedNumericType(number_type));
	match component.operation() {
		Operation::PiecewiseLinear(pwl) => Ok(pwl),
		_ => Err(operation_mismatch(OperationKind::PiecewiseLinear, component)),
	}
}

/// Evaluates the activation over rows `[0, listsize)`, all `cols_in` columns of each.
///
/// ## Throws
///
/// * [`Error::UnsupportedNumericType`] unless `number_type` is [`NumberType::Float`]
#[instrument(skip_all, level = "trace", fields(listsize = listsize))]
pub fn apply_piecewise_linear<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
	number_type: NumberType,
	listsize: usize,
) -> Result<(), Error> {
	let pwl = activation(component, number_type)?;

	let cols = component.cols_in();
	let input = MatrixRef::new(buffers.inputs, listsize, cols, component.cols_in())?;
	let mut output = MatrixMut::new(buffers.outputs, listsize, cols, component.cols_out())?;
	primitives.piecewise_linear(pwl.segments, input, &mut output)?;
	Ok(())
}

/// Evaluates the activation over columns `[0, listsize)` of the single row `row`.
///
/// This is the recurrent hot path, where only the row produced by the latest time step
/// changed.
///
/// ## Throws
///
/// * [`Error::UnsupportedNumericType`] unless `number_type` is [`NumberType::Float`]
#[instrument(skip_all, level = "trace", fields(listsize = listsize, row = row))]
pub fn apply_piecewise_linear_row<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
	number_type: NumberType,
	listsize: usize,
	row: usize,
) -> Result<(), Error> {
	let pwl = activation(component, number_type)?;

	let ld_in = component.cols_in();
	let ld_out = component.cols_out();
	let inputs = buffers.inputs.get(row * ld_in..).unwrap_or_default();
	let outputs = match buffers.outputs.get_mut(row * ld_out..) {
		Some(outputs) => outputs,
		None => &mut [],
	};

	let input = MatrixRef::dense(inputs, 1, listsize)?;
	let mut output = MatrixMut::dense(outputs, 1, listsize)?;
	primitives.piecewise_linear(pwl.segments, input, &mut output)?;
	Ok(())
}
