//! wsmask Comprehensive Criterion Benchmark
//!
//! Statistically rigorous performance measurements across all scenarios.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;
use wsmask::{MaskKey, Masker};

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

const KEY: u32 = 0x37fa_213d;

fn random_payload(size: usize) -> Vec<u8> {
    let mut input = vec![0u8; size];
    rand::rng().fill(&mut input[..]);
    input
}

// =============================================================================
// BENCHMARK 1: LATENCY
// =============================================================================

/// Hot path latency for small frames (control frames, chat messages).
fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Latency");

    let sizes = [
        (1, "1B"),
        (5, "5B"),
        (16, "16B"),
        (125, "125B"),
        (255, "255B"),
        (256, "256B"),
        (KB, "1KB"),
        (4 * KB, "4KB"),
    ];

    for (size, name) in sizes {
        let input = random_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| {
                let mut buf = data.clone();
                b.iter(|| wsmask::mask(black_box(&mut buf[..]), black_box(KEY)))
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: TAIL SWEEP
// =============================================================================

/// Every remainder length 0..=256 in one iteration, so no single branch of
/// the tail decomposition dominates.
fn bench_tail_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Tail-Sweep");

    let input = random_payload(256);
    let total: usize = (0..=256).sum();
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("sizes-0..=256", |b| {
        let mut buf = input.clone();
        b.iter(|| {
            for size in 0..=256 {
                wsmask::mask(black_box(&mut buf[..size]), black_box(KEY));
            }
        })
    });

    group.bench_function("reference-0..=256", |b| {
        let mut buf = input.clone();
        b.iter(|| {
            for size in 0..=256 {
                wsmask::kernels::reference::mask(black_box(&mut buf[..size]), MaskKey::new(KEY));
            }
        })
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 3: BULK
// =============================================================================

/// Throughput at various cache hierarchy levels (L1/L2/L3/RAM).
fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Bulk");
    group.sample_size(50); // Reduced samples for larger inputs

    let sizes = [
        (16 * KB, "16KB-L1"),
        (64 * KB, "64KB-L2"),
        (512 * KB, "512KB-L3"),
        (8 * MB, "8MB-RAM"),
        (64 * MB, "64MB-RAM"),
    ];

    for (size, name) in sizes {
        let input = random_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| {
                let mut buf = data.clone();
                b.iter(|| wsmask::mask(black_box(&mut buf[..]), black_box(KEY)))
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: STREAMING
// =============================================================================

/// Throughput when a message arrives in socket-sized reads.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Streaming");
    group.sample_size(50);

    let test_cases = [
        (MB, 1500, "1MB-MTU-reads"),
        (MB, 4 * KB + 1, "1MB-4KB+1-reads"),
        (16 * MB, 64 * KB, "16MB-64KB-reads"),
    ];

    for (total_size, chunk_size, name) in test_cases {
        let input = random_payload(total_size);
        group.throughput(Throughput::Bytes(total_size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &(input, chunk_size),
            |b, (data, chunk_sz)| {
                let mut buf = data.clone();
                b.iter(|| {
                    let mut masker = Masker::new(MaskKey::new(KEY));
                    for chunk in buf.chunks_mut(*chunk_sz) {
                        masker.apply(black_box(chunk));
                    }
                    masker.offset()
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 5: THREAD SCALING
// =============================================================================

/// Multi-core scaling efficiency using Rayon (1 to N threads).
#[cfg(feature = "multithread")]
fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-Thread-Scaling");
    group.sample_size(50);

    let size = 64 * MB;
    let input = random_payload(size);
    group.throughput(Throughput::Bytes(size as u64));

    let max_threads = num_cpus::get();
    let thread_counts: Vec<usize> = [1, 2, 4, 8, 16, 32]
        .iter()
        .copied()
        .filter(|&t| t <= max_threads)
        .collect();

    for threads in thread_counts {
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(format!("{}threads", threads)),
            &threads,
            |b, &t| {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .build()
                    .unwrap();
                let mut buf = input.clone();
                pool.install(|| {
                    b.iter(|| wsmask::mask_parallel(black_box(&mut buf[..]), black_box(KEY)))
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// MAIN
// =============================================================================

criterion_group!(
    benches,
    bench_latency,
    bench_tail_sweep,
    bench_bulk,
    bench_streaming,
);

#[cfg(feature = "multithread")]
criterion_group!(benches_multithread, bench_thread_scaling,);

#[cfg(feature = "multithread")]
criterion_main!(benches, benches_multithread);

#[cfg(not(feature = "multithread"))]
criterion_main!(benches);
