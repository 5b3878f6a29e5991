use criterion::{criterion_group, criterion_main, Criterion};
use gf2matrix::GF2Matrix;
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

fn bench_matrix_ops(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let m1 = GF2Matrix::random(&mut rng, 64, 64).unwrap();
    let m2 = GF2Matrix::random(&mut rng, 64, 64).unwrap();

    c.bench_function("multiply 64x64", |b| {
        b.iter(|| black_box(&m1).multiply(black_box(&m2)))
    });
    c.bench_function("add 64x64", |b| b.iter(|| black_box(&m1).add(black_box(&m2))));
    c.bench_function("rank 64x64", |b| b.iter(|| black_box(&m1).rank()));
    c.bench_function("transpose 64x64", |b| b.iter(|| black_box(&m1).transposed()));

    let inv = GF2Matrix::random_invertible(&mut rng, 64).unwrap();
    c.bench_function("inverse 64x64", |b| b.iter(|| black_box(&inv).inverse()));
}

criterion_group!(benches, bench_matrix_ops);
criterion_main!(benches);
