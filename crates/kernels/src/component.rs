// Copyright 2025 Irreducible Inc.

use getset::{CopyGetters, Getters};
use gna_math::{ConvolutionParams, PoolParams, PwlSegment};
use static_assertions::const_assert_eq;

/// Element width, in bytes, of every buffer the kernels operate on.
pub const FLOAT_BYTES: usize = 4;

const_assert_eq!(std::mem::size_of::<f32>(), FLOAT_BYTES);

/// Numeric representation requested for an activation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
	#[default]
	Float,
	Int,
}

/// Logical dimensions of a component.
///
/// `cols_in` and `cols_out` double as the row strides of the input and output buffers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
	pub rows_in: usize,
	pub cols_in: usize,
	pub rows_out: usize,
	pub cols_out: usize,
}

impl Shape {
	pub const fn new(rows_in: usize, cols_in: usize, rows_out: usize, cols_out: usize) -> Self {
		Self {
			rows_in,
			cols_in,
			rows_out,
			cols_out,
		}
	}
}

/// Weights and biases of an affine or diagonal layer.
///
/// For [`Operation::Affine`] the weights are a dense `rows_out x rows_in` matrix. For
/// [`Operation::Diagonal`] they are the `rows_out` diagonal entries.
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform<'a> {
	pub weights: &'a [f32],
	pub biases: &'a [f32],
}

/// Weights and biases of a recurrent layer.
///
/// The weights are a `cols_out x (cols_in + cols_out)` matrix applied to an input row
/// concatenated with the feedback vector. The feedback changes every time step, so it is
/// passed per call rather than stored here.
#[derive(Debug, Clone, Copy)]
pub struct RecurrentTransform<'a> {
	pub weights: &'a [f32],
	pub biases: &'a [f32],
}

#[derive(Debug, Clone, Copy)]
pub struct Convolution1D<'a> {
	/// `num_filters x num_filter_coefficients`, row-major.
	pub filters: &'a [f32],
	pub biases: &'a [f32],
	pub num_filters: usize,
	pub num_filter_coefficients: usize,
	pub params: ConvolutionParams,
}

#[derive(Debug, Clone, Copy)]
pub struct PiecewiseLinear<'a> {
	/// Segments ordered by ascending `x_base`.
	pub segments: &'a [PwlSegment],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyExtent {
	pub num_copy_rows: usize,
	pub num_copy_columns: usize,
}

/// The operation a component performs, together with the data it needs.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
	Affine(AffineTransform<'a>),
	Diagonal(AffineTransform<'a>),
	Recurrent(RecurrentTransform<'a>),
	Convolution1D(Convolution1D<'a>),
	PiecewiseLinear(PiecewiseLinear<'a>),
	MaxPool(PoolParams),
	Transpose,
	Copy(CopyExtent),
}

/// The payload-free tag of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
	Affine,
	Diagonal,
	Recurrent,
	Convolution1D,
	PiecewiseLinear,
	MaxPool,
	Transpose,
	Copy,
}

impl Operation<'_> {
	pub fn kind(&self) -> OperationKind {
		match self {
			Self::Affine(_) => OperationKind::Affine,
			Self::Diagonal(_) => OperationKind::Diagonal,
			Self::Recurrent(_) => OperationKind::Recurrent,
			Self::Convolution1D(_) => OperationKind::Convolution1D,
			Self::PiecewiseLinear(_) => OperationKind::PiecewiseLinear,
			Self::MaxPool(_) => OperationKind::MaxPool,
			Self::Transpose => OperationKind::Transpose,
			Self::Copy(_) => OperationKind::Copy,
		}
	}
}

/// One compiled layer instance.
///
/// Components are populated by the compiler before any kernel runs and are never mutated by
/// the kernels. The weights they reference are borrowed from the compiled model.
#[derive(Debug, Clone, CopyGetters, Getters)]
pub struct Component<'a> {
	#[getset(get_copy = "pub")]
	shape: Shape,
	#[getset(get_copy = "pub")]
	bytes_per_input: usize,
	#[getset(get_copy = "pub")]
	bytes_per_output: usize,
	#[getset(get = "pub")]
	operation: Operation<'a>,
}

impl<'a> Component<'a> {
	/// Creates a component with single-precision float inputs and outputs.
	pub fn new(shape: Shape, operation: Operation<'a>) -> Self {
		Self {
			shape,
			bytes_per_input: FLOAT_BYTES,
			bytes_per_output: FLOAT_BYTES,
			operation,
		}
	}

	pub fn with_bytes_per_input(mut self, bytes_per_input: usize) -> Self {
		self.bytes_per_input = bytes_per_input;
		self
	}

	pub fn with_bytes_per_output(mut self, bytes_per_output: usize) -> Self {
		self.bytes_per_output = bytes_per_output;
		self
	}

	pub fn kind(&self) -> OperationKind {
		self.operation.kind()
	}

	pub fn rows_in(&self) -> usize {
		self.shape.rows_in
	}

	pub fn cols_in(&self) -> usize {
		self.shape.cols_in
	}

	pub fn rows_out(&self) -> usize {
		self.shape.rows_out
	}

	pub fn cols_out(&self) -> usize {
		self.shape.cols_out
	}
}

/// An ordered sequence of components, as produced by the compiler for one network.
#[derive(Debug, Clone, Default)]
pub struct CompiledModel<'a> {
	pub components: Vec<Component<'a>>,
}

impl<'a> CompiledModel<'a> {
	pub fn new(components: Vec<Component<'a>>) -> Self {
		Self { components }
	}

	pub fn num_components(&self) -> usize {
		self.components.len()
	}
}

impl<'a> FromIterator<Component<'a>> for CompiledModel<'a> {
	fn from_iter<I: IntoIterator<Item = Component<'a>>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}
