// Copyright 2025 Irreducible Inc.

//! Offline verification tooling for compiled GNA networks.
//!
//! * [`is_compatible`] decides whether two compiled models can have their outputs diffed
//!   row-for-row.
//! * [`ScoreError`] accumulates error statistics between a reference execution and an
//!   accelerated one.
//! * [`stable_softmax`] turns final log-likelihood scores into normalized log-probabilities.
//!
//! None of this runs on the inference hot path.

mod compatibility;
mod error;
mod score_error;
mod softmax;

pub use compatibility::*;
pub use error::*;
pub use score_error::*;
pub use softmax::*;
