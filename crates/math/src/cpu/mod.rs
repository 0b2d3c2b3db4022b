// Copyright 2025 Irreducible Inc.

//! Reference CPU implementation of the numeric primitives.
//!
//! This implementation is not optimized to use multi-threading or SIMD arithmetic. It is optimized
//! for readability, used to validate the kernel interfaces and provide algorithmic references
//! for accelerated backends.

mod banded;
mod conv;
mod gemm;
mod pool;
mod pwl;

use tracing::instrument;

pub use self::{
	banded::sbmv_accumulate,
	conv::convolve_1d,
	gemm::{gemm_accumulate, gemm_subset_accumulate, gemv_split},
	pool::max_pool,
	pwl::piecewise_linear,
};
use crate::{
	ConvolutionParams, Error, MatrixMut, MatrixRef, NumericPrimitives, PoolParams, PwlSegment,
	VectorMut, VectorRef,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct CpuPrimitives;

impl NumericPrimitives for CpuPrimitives {
	#[instrument(skip_all, level = "trace")]
	fn gemm_accumulate(
		&self,
		a: MatrixRef<'_>,
		b: MatrixRef<'_>,
		c: &mut MatrixMut<'_>,
	) -> Result<(), Error> {
		gemm_accumulate(a, b, c)
	}

	#[instrument(skip_all, level = "trace")]
	fn gemm_subset_accumulate(
		&self,
		a: MatrixRef<'_>,
		b: MatrixRef<'_>,
		c: &mut MatrixMut<'_>,
		rows: &[u32],
	) -> Result<(), Error> {
		gemm_subset_accumulate(a, b, c, rows)
	}

	#[instrument(skip_all, level = "trace")]
	fn sbmv_accumulate(
		&self,
		bandwidth: usize,
		band: MatrixRef<'_>,
		x: VectorRef<'_>,
		y: &mut VectorMut<'_>,
	) -> Result<(), Error> {
		sbmv_accumulate(bandwidth, band, x, y)
	}

	#[instrument(skip_all, level = "trace")]
	fn gemv_split(
		&self,
		weights: MatrixRef<'_>,
		bias: &[f32],
		x1: &[f32],
		x2: &[f32],
		y: &mut [f32],
	) -> Result<(), Error> {
		gemv_split(weights, bias, x1, x2, y)
	}

	#[instrument(skip_all, level = "trace")]
	fn convolve_1d(
		&self,
		params: &ConvolutionParams,
		filters: MatrixRef<'_>,
		biases: &[f32],
		input: &[f32],
		output: &mut [f32],
	) -> Result<(), Error> {
		convolve_1d(params, filters, biases, input, output)
	}

	#[instrument(skip_all, level = "trace")]
	fn max_pool(&self, params: &PoolParams, input: &[f32], output: &mut [f32]) -> Result<(), Error> {
		max_pool(params, input, output)
	}

	#[instrument(skip_all, level = "trace")]
	fn piecewise_linear(
		&self,
		segments: &[PwlSegment],
		input: MatrixRef<'_>,
		output: &mut MatrixMut<'_>,
	) -> Result<(), Error> {
		piecewise_linear(segments, input, output)
	}
}
