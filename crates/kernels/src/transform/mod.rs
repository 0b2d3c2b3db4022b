// Copyright 2025 Irreducible Inc.

//! One kernel per layer kind.
//!
//! Every kernel validates the element layout before touching any buffer, so a failed
//! precondition never leaves a partially written output.

mod affine;
mod convolution;
mod copy;
mod diagonal;
mod max_pool;
mod piecewise_linear;
mod recurrent;
mod transpose;

pub use affine::apply_affine;
pub use convolution::apply_convolution_1d;
pub use copy::apply_copy;
pub use diagonal::apply_diagonal;
pub use max_pool::apply_max_pool;
pub use piecewise_linear::{apply_piecewise_linear, apply_piecewise_linear_row};
pub use recurrent::apply_recurrent;
pub use transpose::apply_transpose;

use gna_utils::ensure;

use crate::{
	component::{Component, OperationKind, FLOAT_BYTES},
	error::Error,
};

fn check_layout(component: &Component<'_>) -> Result<(), Error> {
	ensure!(
		component.bytes_per_input() == FLOAT_BYTES,
		Error::InvalidLayout {
			bytes_per_input: component.bytes_per_input(),
		}
	);
	Ok(())
}

fn operation_mismatch(expected: OperationKind, component: &Component<'_>) -> Error {
	Error::OperationMismatch {
		expected,
		actual: component.kind(),
	}
}

fn check_len(arg: &str, data: &[f32], expected: usize) -> Result<(), Error> {
	ensure!(
		data.len() >= expected,
		gna_math::Error::IncorrectArgumentLength {
			arg: arg.into(),
			expected,
			actual: data.len(),
		}
	);
	Ok(())
}
