//! Benchmarks for generator bulk paths versus per-element writes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packmat_core::{CopyGen, FillGen, GridLayout, MatrixGenerator, ZeroGen};

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_gen");

    for n in [16, 64, 256] {
        let src: Vec<f64> = (0..n * n).map(|k| k as f64).collect();
        let generator = CopyGen::new(&src);

        let dense = GridLayout::col_major(n, n);
        let mut dst = vec![0.0; dense.required_len()];
        group.bench_with_input(BenchmarkId::new("contiguous", n), &n, |b, _| {
            b.iter(|| generator.generate_into(black_box(&dense), &mut dst));
        });

        let padded = GridLayout::with_leading_dim(n, n, n + 3);
        let mut dst = vec![0.0; padded.required_len()];
        group.bench_with_input(BenchmarkId::new("leading_dim", n), &n, |b, _| {
            b.iter(|| generator.generate_into(black_box(&padded), &mut dst));
        });

        let strided = GridLayout::dynamic(n, n, 2, 2 * n);
        let mut dst = vec![0.0; strided.required_len()];
        group.bench_with_input(BenchmarkId::new("strided", n), &n, |b, _| {
            b.iter(|| generator.generate_into(black_box(&strided), &mut dst));
        });
    }
    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let layout = GridLayout::with_leading_dim(128, 128, 130);
    let mut dst = vec![1.0f64; layout.required_len()];

    c.bench_function("fill_gen_128x128", |b| {
        b.iter(|| FillGen::new(black_box(2.0)).generate_into(&layout, &mut dst));
    });
    c.bench_function("zero_gen_128x128", |b| {
        b.iter(|| ZeroGen::<f64>::new().generate_into(&layout, &mut dst));
    });
}

criterion_group!(benches, bench_copy, bench_fill);
criterion_main!(benches);
