// Copyright 2025 Irreducible Inc.

use gna_math::{MatrixMut, MatrixRef, NumericPrimitives};
use tracing::instrument;

use super::{check_layout, check_len, operation_mismatch};
use crate::{
	buffers::ComponentBuffers,
	component::{Component, Operation, OperationKind},
	error::Error,
};

/// Applies a fully-connected layer, `C = broadcast(bias) + A · B`.
///
/// `A` is the `rows_out x rows_in` weight matrix, `B` the `rows_in x cols_in` input and `C` the
/// output, written with row stride `cols_out`.
///
/// Without `active_rows` every output row is computed. With `active_rows`, position `l` of the
/// list selects the global row `active_rows[l]` whose weights and bias are used, and the result
/// is written compacted at output row `l`.
///
/// ## Throws
///
/// * [`Error::InvalidLayout`] if the element width is not 4 bytes
/// * [`Error::OperationMismatch`] if the component is not [`Operation::Affine`]
#[instrument(skip_all, level = "trace", fields(active = ?active_rows.map(<[u32]>::len)))]
pub fn apply_affine<P: NumericPrimitives>(
	primitives: &P,
	component: &Component<'_>,
	buffers: ComponentBuffers<'_>,
	active_rows: Option<&[u32]>,
) -> Result<(), Error> {
	check_layout(component)?;
	let Operation::Affine(transform) = component.operation() else {
		return Err(operation_mismatch(OperationKind::Affine, component));
	};

	let m = component.rows_out();
	let n = component.cols_in();
	let k = component.rows_in();
	let (lda, ldb, ldc) = (k, n, component.cols_out());

	let a = MatrixRef::new(transform.weights, m, k, lda)?;
	let b = MatrixRef::new(buffers.inputs, k, n, ldb)?;
	check_len("biases", transform.biases, m)?;

	match active_rows {
		None => {
			let mut c = MatrixMut::new(buffers.outputs, m, n, ldc)?;
			c.fill_rows(transform.biases);
			primitives.gemm_accumulate(a, b, &mut c)?;
		}
		Some(rows) => {
			#[cfg(feature = "debug_validation")]
			if let Some(&row) = rows.iter().find(|&&row| row as usize >= m) {
				return Err(Error::ActiveRowOutOfRange {
					row: row as usize,
					rows: m,
				});
			}

			let mut c = MatrixMut::new(buffers.outputs, rows.len(), n, ldc)?;
			for (l, &i) in rows.iter().enumerate() {
				c.row_mut(l).fill(transform.biases[i as usize]);
			}
			primitives.gemm_subset_accumulate(a, b, &mut c, rows)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use gna_math::CpuPrimitives;

	use super::*;
	use crate::component::{AffineTransform, Shape};

	const WEIGHTS: [f32; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
	const BIASES: [f32; 3] = [0.5, -1.0, 10.0];

	fn component() -> Component<'static> {
		// 3 outputs, 2 inputs, batch of 2 columns.
		Component::new(
			Shape::new(2, 2, 3, 2),
			Operation::Affine(AffineTransform {
				weights: &WEIGHTS,
				biases: &BIASES,
			}),
		)
	}

	#[test]
	fn test_dense() {
		let inputs = [1.0, 0.0, 0.0, 1.0];
		let mut outputs = [0.0; 6];
		apply_affine(
			&CpuPrimitives,
			&component(),
			ComponentBuffers::new(&inputs, &mut outputs),
			None,
		)
		.unwrap();
		assert_eq!(outputs, [1.5, 2.5, 2.0, 3.0, 15.0, 16.0]);
	}

	#[test]
	fn test_subset_uses_global_row_and_compacted_position() {
		let inputs = [1.0, 0.0, 0.0, 1.0];
		let mut outputs = [-7.0; 6];
		apply_affine(
			&CpuPrimitives,
			&component(),
			ComponentBuffers::new(&inputs, &mut outputs),
			Some(&[2, 0]),
		)
		.unwrap();
		assert_eq!(outputs, [15.0, 16.0, 1.5, 2.5, -7.0, -7.0]);
	}

	#[cfg(feature = "debug_validation")]
	#[test]
	fn test_subset_row_out_of_range() {
		let inputs = [1.0, 0.0, 0.0, 1.0];
		let mut outputs = [0.0; 6];
		assert_matches!(
			apply_affine(
				&CpuPrimitives,
				&component(),
				ComponentBuffers::new(&inputs, &mut outputs),
				Some(&[3]),
			),
			Err(Error::ActiveRowOutOfRange { row: 3, rows: 3 })
		);
		assert_eq!(outputs, [0.0; 6]);
	}

	#[test]
	fn test_bad_width() {
		let inputs = [0.0; 4];
		let mut outputs = [3.0; 6];
		assert_matches!(
			apply_affine(
				&CpuPrimitives,
				&component().with_bytes_per_input(2),
				ComponentBuffers::new(&inputs, &mut outputs),
				None,
			),
			Err(Error::InvalidLayout { bytes_per_input: 2 })
		);
		assert_eq!(outputs, [3.0; 6]);
	}

	#[test]
	fn test_wrong_operation() {
		let inputs = [0.0; 4];
		let mut outputs = [0.0; 4];
		let transpose = Component::new(Shape::new(2, 2, 2, 2), Operation::Transpose);
		assert_matches!(
			apply_affine(&CpuPrimitives, &transpose, ComponentBuffers::new(&inputs, &mut outputs), None),
			Err(Error::OperationMismatch {
				expected: OperationKind::Affine,
				actual: OperationKind::Transpose,
			})
		);
	}
}
