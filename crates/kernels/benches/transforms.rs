// Copyright 2025 Irreducible Inc.

use std::iter::repeat_with;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gna_kernels::{
	transform::{apply_affine, apply_diagonal, apply_transpose},
	AffineTransform, Component, ComponentBuffers, CpuPrimitives, Operation, Shape,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_vec(rng: &mut impl Rng, n: usize) -> Vec<f32> {
	repeat_with(|| rng.gen_range(-1.0f32..1.0)).take(n).collect()
}

fn bench_affine(c: &mut Criterion) {
	let mut group = c.benchmark_group("affine");
	let mut rng = StdRng::seed_from_u64(0);

	for (rows_in, rows_out, batch) in [(256, 256, 8), (512, 1024, 8), (440, 2048, 1)] {
		let weights = random_vec(&mut rng, rows_out * rows_in);
		let biases = random_vec(&mut rng, rows_out);
		let inputs = random_vec(&mut rng, rows_in * batch);
		let mut outputs = vec![0.0; rows_out * batch];
		let component = Component::new(
			Shape::new(rows_in, batch, rows_out, batch),
			Operation::Affine(AffineTransform {
				weights: &weights,
				biases: &biases,
			}),
		);
		let active = (0..rows_out as u32).step_by(4).collect::<Vec<_>>();

		group.throughput(Throughput::Elements((rows_in * rows_out * batch) as u64));
		group.bench_function(format!("dense/{rows_out}x{rows_in}x{batch}"), |b| {
			b.iter(|| {
				apply_affine(
					&CpuPrimitives,
					&component,
					ComponentBuffers::new(&inputs, &mut outputs),
					None,
				)
			})
		});
		group.bench_function(format!("quarter_subset/{rows_out}x{rows_in}x{batch}"), |b| {
			b.iter(|| {
				apply_affine(
					&CpuPrimitives,
					&component,
					ComponentBuffers::new(&inputs, &mut outputs),
					Some(active.as_slice()),
				)
			})
		});
	}
	group.finish();
}

fn bench_diagonal_and_transpose(c: &mut Criterion) {
	let mut group = c.benchmark_group("elementwise");
	let mut rng = StdRng::seed_from_u64(1);

	let (rows, cols) = (1024, 8);
	let weights = random_vec(&mut rng, rows);
	let biases = random_vec(&mut rng, rows);
	let inputs = random_vec(&mut rng, rows * cols);
	let mut outputs = vec![0.0; rows * cols];
	let diagonal = Component::new(
		Shape::new(rows, cols, rows, cols),
		Operation::Diagonal(AffineTransform {
			weights: &weights,
			biases: &biases,
		}),
	);
	let transpose = Component::new(Shape::new(rows, cols, cols, rows), Operation::Transpose);

	group.throughput(Throughput::Elements((rows * cols) as u64));
	group.bench_function("diagonal/1024x8", |b| {
		b.iter(|| {
			apply_diagonal(&CpuPrimitives, &diagonal, ComponentBuffers::new(&inputs, &mut outputs))
		})
	});
	group.bench_function("transpose/1024x8", |b| {
		b.iter(|| apply_transpose(&transpose, ComponentBuffers::new(&inputs, &mut outputs)))
	});
	group.finish();
}

criterion_group!(transforms, bench_affine, bench_diagonal_and_transpose);
criterion_main!(transforms);
