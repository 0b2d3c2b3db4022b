// Copyright 2025 Irreducible Inc.

//! Numeric building blocks for the GNA layer kernels.
//!
//! This crate provides:
//!
//! * Strided row-major matrix and vector views over caller-owned `f32` buffers
//! * The [`NumericPrimitives`] trait, the narrow interface through which kernels reach a
//!   linear-algebra backend
//! * [`CpuPrimitives`], a reference implementation of that trait
//!
//! Every primitive follows the accumulate-into-preseeded-output convention: the caller writes
//! biases (or zeros) into the output first and the primitive accumulates on top.

pub mod cpu;
mod error;
mod matrix;
mod primitives;

pub use cpu::CpuPrimitives;
pub use error::*;
pub use matrix::*;
pub use primitives::*;
