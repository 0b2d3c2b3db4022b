// Copyright 2025 Irreducible Inc.

use std::iter::repeat_with;

use gna_kernels::{CompiledModel, Component, CopyExtent, Operation, Shape};
use gna_verify::{
	first_incompatibility, is_compatible, stable_softmax, CompareConfig, Incompatibility,
	ScoreError,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_model(rng: &mut impl Rng, len: usize) -> CompiledModel<'static> {
	repeat_with(|| {
		let shape = Shape::new(
			rng.gen_range(1..4),
			rng.gen_range(1..4),
			rng.gen_range(1..4),
			rng.gen_range(1..4),
		);
		let operation = if rng.gen_bool(0.5) {
			Operation::Transpose
		} else {
			Operation::Copy(CopyExtent {
				num_copy_rows: shape.rows_in,
				num_copy_columns: shape.cols_in,
			})
		};
		Component::new(shape, operation)
	})
	.take(len)
	.collect()
}

/// An accumulator whose every sum is a small multiple of 1/8, so merges are exact.
fn exact_score_error(rng: &mut impl Rng) -> ScoreError {
	let num_scores = rng.gen_range(0..1000u64);
	let num_errors = rng.gen_range(0..=num_scores);
	let mut dyadic = || f64::from(rng.gen_range(0..256u32)) / 8.0;
	ScoreError {
		num_scores,
		num_errors,
		max_error: dyadic(),
		sum_error: dyadic(),
		sum_squared_error: dyadic(),
		max_rel_error: dyadic(),
		sum_rel_error: dyadic(),
		sum_squared_rel_error: dyadic(),
	}
}

fn exp_total(log_probabilities: &[f32]) -> f64 {
	log_probabilities.iter().map(|&x| f64::from(x).exp()).sum()
}

fn merged(a: &ScoreError, b: &ScoreError) -> ScoreError {
	let mut out = *a;
	out.update(b);
	out
}

proptest! {
	#[test]
	fn test_compatibility_is_reflexive_and_symmetric(len in 0..6usize, seed in any::<u64>()) {
		let mut rng = StdRng::seed_from_u64(seed);
		let a = random_model(&mut rng, len);
		let b = random_model(&mut rng, len);

		prop_assert!(is_compatible(&a, &a));
		prop_assert_eq!(is_compatible(&a, &b), is_compatible(&b, &a));
	}

	#[test]
	fn test_component_count_mismatch_is_incompatible(len in 0..6usize, extra in 1..3usize) {
		let mut rng = StdRng::seed_from_u64(0);
		let a = random_model(&mut rng, len);
		let mut b = a.clone();
		b.components.extend(random_model(&mut rng, extra).components);

		prop_assert!(!is_compatible(&a, &b));
		prop_assert_eq!(
			first_incompatibility(&a.components, &b.components),
			Some(Incompatibility::ComponentCount { left: len, right: len + extra })
		);
	}

	#[test]
	fn test_score_error_merge_is_commutative_and_associative(seed in any::<u64>()) {
		let mut rng = StdRng::seed_from_u64(seed);
		let a = exact_score_error(&mut rng);
		let b = exact_score_error(&mut rng);
		let c = exact_score_error(&mut rng);

		prop_assert_eq!(merged(&a, &b), merged(&b, &a));
		prop_assert_eq!(merged(&merged(&a, &b), &c), merged(&a, &merged(&b, &c)));
	}

	#[test]
	fn test_parallel_merge_matches_sequential(n in 0..64usize, seed in any::<u64>()) {
		let mut rng = StdRng::seed_from_u64(seed);
		let parts = repeat_with(|| exact_score_error(&mut rng)).take(n).collect::<Vec<_>>();

		prop_assert_eq!(ScoreError::merge_all(&parts), parts.iter().sum::<ScoreError>());
	}

	#[test]
	fn test_split_comparison_matches_whole(rows in 1..8usize, cols in 1..8usize, seed in any::<u64>()) {
		let mut rng = StdRng::seed_from_u64(seed);
		// Quarter-integers keep every difference and sum exact.
		let mut values = |n: usize| {
			repeat_with(|| rng.gen_range(-32i32..32) as f32 / 4.0).take(n).collect::<Vec<_>>()
		};
		let reference = values(rows * cols);
		let scores = values(rows * cols);
		let config = CompareConfig::new(1.0);

		let whole = ScoreError::compare(&reference, &scores, rows, cols, &config).unwrap();
		let per_row = (0..rows)
			.map(|i| {
				let range = i * cols..(i + 1) * cols;
				ScoreError::compare(&reference[range.clone()], &scores[range], 1, cols, &config)
					.unwrap()
			})
			.collect::<Vec<_>>();

		let combined = ScoreError::merge_all(&per_row);

		prop_assert_eq!(whole.num_scores, (rows * cols) as u64);
		prop_assert_eq!(whole.num_errors, combined.num_errors);
		prop_assert_eq!(whole.max_error, combined.max_error);
		prop_assert_eq!(whole.sum_error, combined.sum_error);
	}

	#[test]
	fn test_softmax_probabilities_sum_to_one(
		offset in -1e30f32..1e30,
		spread in prop::collection::vec(-50.0f32..50.0, 1..64),
	) {
		let input = spread.iter().map(|&x| offset + x).collect::<Vec<_>>();
		let mut output = vec![0.0; input.len()];
		stable_softmax(&input, &mut output).unwrap();

		prop_assert!((exp_total(&output) - 1.0).abs() < 1e-4, "total = {}", exp_total(&output));
		prop_assert!(output.iter().all(|&x| x <= 1e-6));
	}

	#[test]
	fn test_softmax_is_normalized_for_very_negative_input(
		input in prop::collection::vec(-1e30f32..-1e29, 1..16),
	) {
		let mut output = vec![0.0; input.len()];
		stable_softmax(&input, &mut output).unwrap();
		prop_assert!(output.iter().all(|x| x.is_finite()));
		prop_assert!((exp_total(&output) - 1.0).abs() < 1e-4, "total = {}", exp_total(&output));
	}
}

#[test]
fn test_softmax_with_subscriber_installed() {
	gna_utils::tracing::init_tracing();

	let input = [f32::MIN, 0.0, f32::MIN];
	let mut output = [0.0; 2];
	stable_softmax(&input, &mut output).unwrap();
	assert_eq!(output, [f32::MIN, 0.0]);
}
