// Copyright 2025 Irreducible Inc.

use auto_impl::auto_impl;

use super::{
	error::Error,
	matrix::{MatrixMut, MatrixRef, VectorMut, VectorRef},
};

/// One segment of a piecewise-linear activation.
///
/// For inputs `x >= x_base` (up to the next segment's base) the activation is
/// `y_base + slope * (x - x_base)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwlSegment {
	pub x_base: f32,
	pub y_base: f32,
	pub slope: f32,
}

impl PwlSegment {
	pub const fn new(x_base: f32, y_base: f32, slope: f32) -> Self {
		Self {
			x_base,
			y_base,
			slope,
		}
	}

	#[inline]
	pub fn eval(&self, x: f32) -> f32 {
		self.y_base + self.slope * (x - self.x_base)
	}
}

/// Shape parameters of a 1-D convolution over one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolutionParams {
	/// Distance, in elements, between the starts of consecutive filter applications.
	pub feature_map_stride: usize,
}

impl ConvolutionParams {
	/// Number of filter positions that fit an input of `input_len` elements.
	pub fn num_positions(&self, num_coefficients: usize, input_len: usize) -> Result<usize, Error> {
		if self.feature_map_stride == 0 {
			return Err(Error::ZeroStride);
		}
		if num_coefficients == 0 || num_coefficients > input_len {
			return Err(Error::FilterLongerThanInput {
				num_coefficients,
				input_len,
			});
		}
		Ok((input_len - num_coefficients) / self.feature_map_stride + 1)
	}
}

/// Shape parameters of a max pooling over one input row laid out as `[position][channel]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolParams {
	pub pool_size: usize,
	pub pool_stride: usize,
	pub num_channels: usize,
}

impl PoolParams {
	/// Number of pooling windows over `num_positions` input positions.
	///
	/// Windows start every `pool_stride` positions for as long as the previous window did not
	/// reach the end of the input; the last window may be truncated.
	pub fn num_windows(&self, num_positions: usize) -> Result<usize, Error> {
		if self.pool_stride == 0 {
			return Err(Error::ZeroStride);
		}
		if self.pool_size == 0 || self.num_channels == 0 {
			return Err(Error::DimensionMismatch(
				"pool size and channel count must be non-zero".into(),
			));
		}
		if num_positions <= self.pool_size {
			return Ok(usize::from(num_positions > 0));
		}
		Ok((num_positions - self.pool_size).div_ceil(self.pool_stride) + 1)
	}
}

/// The numeric building blocks a layer kernel delegates to.
///
/// Operands are row-major with an explicit leading dimension per operand. Every operation
/// accumulates into its output, which the caller seeds (typically with biases) beforehand,
/// except for [`Self::convolve_1d`], [`Self::max_pool`] and [`Self::piecewise_linear`], which
/// overwrite the output region they cover.
///
/// Implementations are free to use any linear-algebra backend as long as they honor this
/// contract; the kernels never inspect how the work is done.
#[auto_impl(&, Box, Arc)]
pub trait NumericPrimitives {
	/// Dense `C += A · B`.
	///
	/// ## Preconditions
	///
	/// * `a` is `m x k`, `b` is `k x n` and `c` is `m x n`
	fn gemm_accumulate(
		&self,
		a: MatrixRef<'_>,
		b: MatrixRef<'_>,
		c: &mut MatrixMut<'_>,
	) -> Result<(), Error>;

	/// Row-subset `C[l] += A[rows[l]] · B` for every position `l` of `rows`.
	///
	/// The selected rows index `a`, while the results are written compacted: position `l` of the
	/// list lands in row `l` of `c`.
	///
	/// ## Preconditions
	///
	/// * `c` has at least `rows.len()` rows
	/// * every entry of `rows` is a valid row index of `a`
	fn gemm_subset_accumulate(
		&self,
		a: MatrixRef<'_>,
		b: MatrixRef<'_>,
		c: &mut MatrixMut<'_>,
		rows: &[u32],
	) -> Result<(), Error>;

	/// Symmetric banded `y += A · x`, with `A` given in lower band storage.
	///
	/// Row `i` of `band` holds the entries `A[i][i - bandwidth..=i]`, so `band` has
	/// `bandwidth + 1` columns. With `bandwidth == 0` this is an elementwise scale.
	fn sbmv_accumulate(
		&self,
		bandwidth: usize,
		band: MatrixRef<'_>,
		x: VectorRef<'_>,
		y: &mut VectorMut<'_>,
	) -> Result<(), Error>;

	/// Matrix-vector product over a concatenated input, `y = bias + W · [x1 ‖ x2]`.
	///
	/// `weights` is `y.len() x (x1.len() + x2.len())`. Unlike the other products this writes
	/// the bias itself, since the output is a single short row.
	fn gemv_split(
		&self,
		weights: MatrixRef<'_>,
		bias: &[f32],
		x1: &[f32],
		x2: &[f32],
		y: &mut [f32],
	) -> Result<(), Error>;

	/// 1-D convolution of a single input row with a bank of filters.
	///
	/// `filters` is `num_filters x num_coefficients`. The output is laid out as
	/// `[position][filter]` and the bias of each filter is added here.
	fn convolve_1d(
		&self,
		params: &ConvolutionParams,
		filters: MatrixRef<'_>,
		biases: &[f32],
		input: &[f32],
		output: &mut [f32],
	) -> Result<(), Error>;

	/// Max pooling of a single input row laid out as `[position][channel]`.
	fn max_pool(&self, params: &PoolParams, input: &[f32], output: &mut [f32]) -> Result<(), Error>;

	/// Evaluates a piecewise-linear activation elementwise from `input` into `output`.
	///
	/// `segments` must be ordered by ascending `x_base`. Inputs below the first segment saturate
	/// at its `y_base`.
	fn piecewise_linear(
		&self,
		segments: &[PwlSegment],
		input: MatrixRef<'_>,
		output: &mut MatrixMut<'_>,
	) -> Result<(), Error>;
}
