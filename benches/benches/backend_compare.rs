//! Backend Comparison Benchmark
//!
//! Compares the runtime dispatcher against each backend selected explicitly
//! and against the byte-at-a-time reference. Validates the cost of fallback
//! paths.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use wsmask::kernels::reference;
use wsmask::{Backend, MaskKey};

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("wsmask Backends");
    let key = MaskKey::new(0x37fa_213d);

    // Scenarios:
    // - Tiny (7B): dispatch overhead vs tail-only path
    // - Tail (255B): longest tail decomposition
    // - Medium (1KB): L1 cache hot-path
    // - Large (256KB): bulk throughput
    let sizes = [7, 255, 1024, 256 * 1024];

    for size in sizes {
        let mut input = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        // 1. Dispatched (Production Path)
        group.bench_function(format!("Dispatched - {size} bytes"), |b| {
            b.iter(|| wsmask::mask(black_box(&mut input[..]), key));
        });

        // 2. Each backend explicitly (bypasses the cached choice)
        for backend in Backend::supported() {
            let kernel = backend.kernel().unwrap();
            group.bench_function(format!("{backend} - {size} bytes"), |b| {
                b.iter(|| kernel(black_box(&mut input[..]), key));
            });
        }

        // 3. Scalar reference
        group.bench_function(format!("Reference (bytewise) - {size} bytes"), |b| {
            b.iter(|| reference::mask(black_box(&mut input[..]), key));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
