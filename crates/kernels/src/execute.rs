// Copyright 2025 Irreducible Inc.

use gna_math::NumericPrimitives;
use tracing::instrument;

use crate::{
	buffers::ComponentBuffers,
	component::{Component, NumberType, Operation},
	error::Error,
	transform::{
		apply_affine, apply_convolution_1d, apply_copy, apply_diagonal, apply_max_pool,
		apply_piecewise_linear, apply_piecewise_linear_row, apply_recurrent, apply_transpose,
	},
};

/// Which rows of a component an invocation covers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum RowSelection<'a> {
	/// Every row of the declared shape.
	#[default]
	All,
	/// An ordered list of active rows; results are written compacted.
	Subset(&'a [u32]),
	/// A single row, as produced by one recurrent time step.
	Single(usize),
	/// One recurrent time step at `row`, fed back with the previous step's output.
	Step {
		row: usize,
		feedbacks: Option<&'a [f32]>,
	},
}

impl RowSelection<'_> {
	fn name(&self) -> &'static str {
		match self {
			Self::All => "full",
			Self::Subset(_) => "subset",
			Self::Single(_) => "single",
			Self::Step { .. } => "step",
		}
	}
}

/// Runs the kernel matching the component's operation.
///
/// | operation         | `All`               | `Subset(list)`         | `Single(row)`                   | `Step { row, .. }` |
/// |-------------------|---------------------|------------------------|---------------------------------|--------------------|
/// | `Affine`          | dense               | subset mode            | subset of `[row]`               | -                  |
/// | `Recurrent`       | -                   | -                      | -                               | one time step      |
/// | `PiecewiseLinear` | rows `[0, rows_in)` | rows `[0, list.len())` | columns `[0, cols_in)` of `row` | -                  |
/// | others            | full shape          | -                      | -                               | -                  |
///
/// ## Throws
///
/// * [`Error::UnsupportedRowSelection`] for the combinations marked `-` above
/// * any error of the dispatched kernel
#[instrument(skip_all, level = "debug", fields(kind = ?component.kind(), rows = rows.name()))]
pub fn execute<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
	rows: RowSelection<'_>,
	number_type: NumberType,
) -> Result<(), Error> {
	let unsupported = || Error::UnsupportedRowSelection {
		operation: component.kind(),
		selection: rows.name(),
	};

	match (component.operation(), rows) {
		(Operation::Affine(_), RowSelection::All) => apply_affine(primitives, component, buffers, None),
		(Operation::Affine(_), RowSelection::Subset(list)) => {
			apply_affine(primitives, component, buffers, Some(list))
		}
		(Operation::Affine(_), RowSelection::Single(row)) => {
			let row = u32::try_from(row).map_err(|_| Error::ActiveRowOutOfRange {
				row,
				rows: component.rows_out(),
			})?;
			apply_affine(primitives, component, buffers, Some(&[row]))
		}
		(Operation::Recurrent(_), RowSelection::Step { row, feedbacks }) => {
			apply_recurrent(primitives, component, buffers, row, feedbacks)
		}
		(Operation::PiecewiseLinear(_), RowSelection::All) => {
			apply_piecewise_linear(primitives, component, buffers, number_type, component.rows_in())
		}
		(Operation::PiecewiseLinear(_), RowSelection::Subset(list)) => {
			apply_piecewise_linear(primitives, component, buffers, number_type, list.len())
		}
		(Operation::PiecewiseLinear(_), RowSelection::Single(row)) => apply_piecewise_linear_row(
			primitives,
			component,
			buffers,
			number_type,
			component.cols_in(),
			row,
		),
		(Operation::Diagonal(_), RowSelection::All) => apply_diagonal(primitives, component, buffers),
		(Operation::Convolution1D(_), RowSelection::All) => {
			apply_convolution_1d(primitives, component, buffers)
		}
		(Operation::MaxPool(_), RowSelection::All) => apply_max_pool(primitives, component, buffers),
		(Operation::Transpose, RowSelection::All) => apply_transpose(component, buffers),
		(Operation::Copy(_), RowSelection::All) => apply_copy(component, buffers),
		_ => Err(unsupported()),
	}
}
