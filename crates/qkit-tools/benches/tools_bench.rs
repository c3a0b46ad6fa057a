//! Benchmarks for random generation and reference matrices
//!
//! Run with: cargo bench -p qkit-tools

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex64;
use qkit_ir::NativeKind;
use qkit_tools::display::clean_matrix;
use qkit_tools::{compute_expected_matrix, random_circuit};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SINGLE_QUBIT: &[NativeKind] = &[
    NativeKind::H,
    NativeKind::X,
    NativeKind::T,
    NativeKind::Rx,
    NativeKind::Rz,
    NativeKind::U,
];

/// Benchmark random circuit generation
fn bench_random_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_circuit");

    for num_gates in &[10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("all_gates", num_gates),
            num_gates,
            |b, &n| {
                let mut rng = StdRng::seed_from_u64(0);
                b.iter(|| random_circuit(NativeKind::ALL, black_box(8), Some(n), &mut rng).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark the expected matrix computation
fn bench_expected_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("expected_matrix");

    for num_qubits in &[1_u32, 3, 5, 7] {
        let mut rng = StdRng::seed_from_u64(u64::from(*num_qubits));
        let circuit = random_circuit(SINGLE_QUBIT, *num_qubits, Some(20), &mut rng).unwrap();
        group.bench_with_input(
            BenchmarkId::new("20_gates", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| compute_expected_matrix(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark matrix rendering
fn bench_clean_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_matrix");

    for dim in &[4_usize, 16, 64] {
        let m = ndarray::Array2::from_shape_fn((*dim, *dim), |(i, j)| {
            Complex64::new((i as f64 * 0.37).sin(), (j as f64 * 0.11).cos())
        });
        group.bench_with_input(BenchmarkId::new("dim", dim), &m, |b, m| {
            b.iter(|| clean_matrix(black_box(m)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_random_circuit,
    bench_expected_matrix,
    bench_clean_matrix
);
criterion_main!(benches);
