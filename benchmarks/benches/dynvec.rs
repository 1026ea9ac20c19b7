// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use dynvec::DynVec;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench dynvec
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

// =============================================================================
// Vec vs DynVec: growth
// =============================================================================

fn bench_push_from_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_from_empty");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("DynVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = DynVec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("DynVec", size), &size, |b, &s| {
            let mut vec = DynVec::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

// =============================================================================
// Vec vs DynVec: shifting
// =============================================================================

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.insert(0, i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("DynVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = DynVec::new();
                for i in 0..s {
                    vec.insert(0, i as u64);
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    while !vec.is_empty() {
                        vec.remove(0);
                    }
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("DynVec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<DynVec<_>>(),
                |mut vec| {
                    while !vec.is_empty() {
                        vec.erase(0);
                    }
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Vec vs DynVec: copy assignment
// =============================================================================

fn bench_clone_from_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_from_reuse");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let source: Vec<String> = (0..s).map(|i| i.to_string()).collect();
            let mut destination = source.clone();
            b.iter(|| {
                destination.clone_from(&source);
                black_box(&destination);
            });
        });

        group.bench_with_input(BenchmarkId::new("DynVec", size), &size, |b, &s| {
            let source: DynVec<String> = (0..s).map(|i| i.to_string()).collect();
            let mut destination = source.clone();
            b.iter(|| {
                destination.clone_from(&source);
                black_box(&destination);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_from_empty,
    bench_push_reserved,
    bench_insert_front,
    bench_erase_front,
    bench_clone_from_reuse,
);
criterion_main!(benches);
