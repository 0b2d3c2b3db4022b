// Copyright 2025 Irreducible Inc.

use std::{iter::Sum, ops::AddAssign};

use gna_utils::{env::boolean_env_flag_set, rayon::min_chunk_len};
use itertools::izip;
use rayon::prelude::*;
use tracing::{instrument, warn};

use crate::error::Error;

/// Environment variable that makes [`CompareConfig::from_env`] count non-finite scores as errors.
pub const STRICT_ENV_VAR: &str = "GNA_VERIFY_STRICT";

/// Offset added to the reference magnitude when computing relative errors.
const RELATIVE_ERROR_EPSILON: f64 = 1e-20;

/// Error statistics accumulated while comparing scores against a reference.
///
/// Accumulators are merged with [`Self::update`] (or `+=`), which is commutative and
/// associative: counts and sums are added, maxima are combined with a pairwise max. Sums are
/// kept in `f64`, so merges of partial results reorder rounding only at that precision.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScoreError {
	pub num_scores: u64,
	pub num_errors: u64,
	pub max_error: f64,
	pub sum_error: f64,
	pub sum_squared_error: f64,
	pub max_rel_error: f64,
	pub sum_rel_error: f64,
	pub sum_squared_rel_error: f64,
}

/// Parameters of a score comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareConfig {
	/// Absolute error above which a score counts as an error.
	pub threshold: f32,
	/// Count non-finite differences as errors and keep them out of the sums.
	pub strict: bool,
}

impl CompareConfig {
	pub fn new(threshold: f32) -> Self {
		Self {
			threshold,
			strict: false,
		}
	}

	/// A configuration whose strictness is taken from `GNA_VERIFY_STRICT`.
	pub fn from_env(threshold: f32) -> Self {
		Self {
			threshold,
			strict: boolean_env_flag_set(STRICT_ENV_VAR),
		}
	}
}

impl ScoreError {
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// Folds `other` into `self`.
	pub fn update(&mut self, other: &Self) {
		self.num_scores += other.num_scores;
		self.num_errors += other.num_errors;
		self.max_error = self.max_error.max(other.max_error);
		self.sum_error += other.sum_error;
		self.sum_squared_error += other.sum_squared_error;
		self.max_rel_error = self.max_rel_error.max(other.max_rel_error);
		self.sum_rel_error += other.sum_rel_error;
		self.sum_squared_rel_error += other.sum_squared_rel_error;
	}

	/// Accumulates one reference/score pair.
	pub fn record(&mut self, reference: f32, score: f32, config: &CompareConfig) {
		let reference = f64::from(reference);
		let error = (reference - f64::from(score)).abs();

		self.num_scores += 1;
		if !error.is_finite() && config.strict {
			self.num_errors += 1;
			return;
		}

		let rel_error = error / (reference.abs() + RELATIVE_ERROR_EPSILON);
		if error > f64::from(config.threshold) {
			self.num_errors += 1;
		}
		self.max_error = self.max_error.max(error);
		self.sum_error += error;
		self.sum_squared_error += error * error;
		self.max_rel_error = self.max_rel_error.max(rel_error);
		self.sum_rel_error += rel_error;
		self.sum_squared_rel_error += rel_error * rel_error;
	}

	/// Compares the first `num_rows x num_columns` elements of two row-major score matrices.
	///
	/// ## Throws
	///
	/// * [`Error::IncorrectArgumentLength`] if either buffer is shorter than the matrix
	#[instrument(skip_all, level = "debug", fields(num_rows = num_rows, num_columns = num_columns))]
	pub fn compare(
		reference: &[f32],
		scores: &[f32],
		num_rows: usize,
		num_columns: usize,
		config: &CompareConfig,
	) -> Result<Self, Error> {
		let n = num_rows * num_columns;
		for (arg, buffer) in [("reference", reference), ("scores", scores)] {
			if buffer.len() < n {
				return Err(Error::IncorrectArgumentLength {
					arg: arg.into(),
					expected: n,
					actual: buffer.len(),
				});
			}
		}

		let mut result = Self::default();
		for (&r, &s) in izip!(&reference[..n], &scores[..n]) {
			result.record(r, s, config);
		}
		if result.num_errors > 0 {
			warn!(
				num_errors = result.num_errors,
				max_error = result.max_error,
				"scores differ from reference beyond threshold"
			);
		}
		Ok(result)
	}

	/// Merges many partial accumulators in parallel on the global rayon pool.
	///
	/// Pool setup is left to the caller, see [`gna_utils::rayon::adjust_thread_pool`].
	pub fn merge_all(errors: &[Self]) -> Self {
		errors
			.par_iter()
			.with_min_len(min_chunk_len(errors.len()))
			.fold(Self::default, |mut acc, e| {
				acc += e;
				acc
			})
			.reduce(Self::default, |mut a, b| {
				a += b;
				a
			})
	}

	/// Mean absolute error, or zero when nothing was recorded.
	pub fn mean_error(&self) -> f64 {
		mean(self.sum_error, self.num_scores)
	}

	pub fn rms_error(&self) -> f64 {
		mean(self.sum_squared_error, self.num_scores).sqrt()
	}

	pub fn stddev_error(&self) -> f64 {
		stddev(self.sum_error, self.sum_squared_error, self.num_scores)
	}

	pub fn mean_rel_error(&self) -> f64 {
		mean(self.sum_rel_error, self.num_scores)
	}

	pub fn rms_rel_error(&self) -> f64 {
		mean(self.sum_squared_rel_error, self.num_scores).sqrt()
	}

	pub fn stddev_rel_error(&self) -> f64 {
		stddev(self.sum_rel_error, self.sum_squared_rel_error, self.num_scores)
	}
}

fn mean(sum: f64, n: u64) -> f64 {
	if n == 0 {
		0.0
	} else {
		sum / n as f64
	}
}

fn stddev(sum: f64, sum_squared: f64, n: u64) -> f64 {
	let avg = mean(sum, n);
	// E[x^2] - E[x]^2 may cancel slightly below zero.
	(mean(sum_squared, n) - avg * avg).max(0.0).sqrt()
}

impl AddAssign<&ScoreError> for ScoreError {
	fn add_assign(&mut self, rhs: &ScoreError) {
		self.update(rhs);
	}
}

impl AddAssign for ScoreError {
	fn add_assign(&mut self, rhs: ScoreError) {
		self.update(&rhs);
	}
}

impl Sum for ScoreError {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::default(), |mut acc, e| {
			acc += e;
			acc
		})
	}
}

impl<'a> Sum<&'a ScoreError> for ScoreError {
	fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
		iter.fold(Self::default(), |mut acc, e| {
			acc += e;
			acc
		})
	}
}
