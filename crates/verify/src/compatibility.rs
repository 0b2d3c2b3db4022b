// Copyright 2025 Irreducible Inc.

use gna_kernels::{CompiledModel, Component, OperationKind, Shape};
use tracing::debug;

/// The first structural difference found between two compiled models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incompatibility {
	ComponentCount {
		left: usize,
		right: usize,
	},
	Shape {
		index: usize,
		left: Shape,
		right: Shape,
	},
	Operation {
		index: usize,
		left: OperationKind,
		right: OperationKind,
	},
}

/// Finds the first component at which the two sequences differ structurally.
///
/// Only the shape and the operation kind are compared; weights, buffer contents and byte widths
/// are ignored.
pub fn first_incompatibility(
	left: &[Component<'_>],
	right: &[Component<'_>],
) -> Option<Incompatibility> {
	if left.len() != right.len() {
		return Some(Incompatibility::ComponentCount {
			left: left.len(),
			right: right.len(),
		});
	}

	left.iter()
		.zip(right)
		.enumerate()
		.find_map(|(index, (l, r))| {
			if l.shape() != r.shape() {
				Some(Incompatibility::Shape {
					index,
					left: l.shape(),
					right: r.shape(),
				})
			} else if l.kind() != r.kind() {
				Some(Incompatibility::Operation {
					index,
					left: l.kind(),
					right: r.kind(),
				})
			} else {
				None
			}
		})
}

/// Whether the outputs of two compiled models can be compared row-for-row.
///
/// This is reflexive and symmetric. It says nothing about numeric equality.
pub fn is_compatible(left: &CompiledModel<'_>, right: &CompiledModel<'_>) -> bool {
	match first_incompatibility(&left.components, &right.components) {
		None => true,
		Some(incompatibility) => {
			debug!(?incompatibility, "compiled models are not compatible");
			false
		}
	}
}
