// Copyright 2025 Irreducible Inc.

//! Layer-execution kernels for the GNA inference backend.
//!
//! A compiled network is a sequence of [`Component`]s, each describing one layer instance: its
//! shape, its operation and the weights that operation needs. An external scheduler calls one
//! kernel per component per inference step, handing it the component's input and output
//! buffers as a [`ComponentBuffers`] pair. The kernels validate the element layout, seed
//! outputs with biases where the operation has them, and delegate the arithmetic to a
//! [`gna_math::NumericPrimitives`] backend.
//!
//! Kernels never allocate and never mutate component metadata. Buffers are row-major; input
//! and output strides come from `cols_in` and `cols_out` and may differ.

mod buffers;
mod component;
mod error;
mod execute;
pub mod transform;

pub use buffers::*;
pub use component::*;
pub use error::*;
pub use execute::*;
pub use gna_math::{ConvolutionParams, CpuPrimitives, NumericPrimitives, PoolParams, PwlSegment};
