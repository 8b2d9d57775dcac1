//! Criterion benchmarks for angle range sets.
//! Focus sizes: arcs in {1, 4, 16, 64}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use snapguide::angle::{Angle, AngleRangeSet};
use snapguide::rand::{random_range_set, ReplayToken};

fn bench_range_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("angle_range_set");
    for &n in &[1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("add_set", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    (
                        random_range_set(n, ReplayToken::new(11, n as u64)),
                        random_range_set(n, ReplayToken::new(12, n as u64)),
                    )
                },
                |(mut a, other)| {
                    a.add_set(&other);
                    a
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("intersect_set", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    (
                        random_range_set(n, ReplayToken::new(13, n as u64)),
                        random_range_set(n, ReplayToken::new(14, n as u64)),
                    )
                },
                |(mut a, other)| {
                    a.intersect_set(&other);
                    a
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("contains", n), &n, |b, &n| {
            let set = random_range_set(n, ReplayToken::new(15, n as u64));
            let queries: Vec<Angle> = (0..256u32)
                .map(|i| Angle(i.wrapping_mul(0x9e37_79b9)))
                .collect();
            b.iter(|| queries.iter().filter(|&&a| set.contains(a)).count())
        });
    }

    group.bench_function("subtract_four_edges", |b| {
        b.iter(|| {
            let mut s = AngleRangeSet::full();
            for deg in [0.0f64, 90.0, 180.0, -90.0] {
                s.subtract(Angle::from_degrees(deg - 60.0), Angle::from_degrees(deg + 60.0));
            }
            s
        })
    });
    group.finish();
}

criterion_group!(benches, bench_range_set);
criterion_main!(benches);
