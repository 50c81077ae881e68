//! Benchmark comparing the bound math tier against per-lane emulation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packmat_simd::math::{self, emulated};
use packmat_simd::{BuildConfig, DefaultKind, MathFn, Pack, resolve};

type P = Pack<f64, DefaultKind>;

fn packs(size: usize) -> Vec<P> {
    let w = P::WIDTH;
    (0..size / w)
        .map(|p| P::from_fn(|i| ((p * w + i) as f64 + 1.0) * 0.01))
        .collect()
}

fn tier_label(f: MathFn) -> String {
    match resolve::<f64, DefaultKind>(f) {
        Some(t) => t.to_string(),
        None => "unavailable".to_string(),
    }
}

fn bench_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("exp");
    println!("{}", BuildConfig::current());

    for size in [64, 512, 4096] {
        let xs = packs(size);

        group.bench_with_input(BenchmarkId::new("emulated", size), &size, |b, _| {
            b.iter(|| {
                for &x in &xs {
                    black_box(emulated::exp(x));
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new(tier_label(MathFn::Exp), size),
            &size,
            |b, _| {
                b.iter(|| {
                    for &x in &xs {
                        black_box(math::exp(x));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_sqrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt");

    for size in [64, 512, 4096] {
        let xs = packs(size);

        group.bench_with_input(BenchmarkId::new("emulated", size), &size, |b, _| {
            b.iter(|| {
                for &x in &xs {
                    black_box(emulated::sqrt(x));
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new(tier_label(MathFn::Sqrt), size),
            &size,
            |b, _| {
                b.iter(|| {
                    for &x in &xs {
                        black_box(math::sqrt(x));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_xlogy(c: &mut Criterion) {
    let xs = packs(1024);
    c.bench_function("xlogy_1024", |b| {
        b.iter(|| {
            for &x in &xs {
                black_box(math::xlogy(x - P::splat(0.5), x));
            }
        });
    });
}

criterion_group!(benches, bench_exp, bench_sqrt, bench_xlogy);
criterion_main!(benches);
