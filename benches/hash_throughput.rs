// Criterion view of the same adapters, for per-byte throughput plots.
// Run with: cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashbench::corpus::Corpus;
use hashbench::hashers::HashAlgorithm;
use std::hint::black_box;

fn bench_hashing(c: &mut Criterion) {
    let corpus = Corpus::default();
    let sizes: [usize; 5] = [8, 64, 1024, 4096, 32 * 1024];

    let mut group = c.benchmark_group("hash_throughput");

    for size in sizes {
        let data = &corpus.as_bytes()[..size];

        group.throughput(Throughput::Bytes(size as u64));

        for algo in HashAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algo.name(), size), data, |b, data| {
                b.iter(|| algo.digest(black_box(data)))
            });
        }
    }
    group.finish();
}

fn bench_sliding_window(c: &mut Criterion) {
    let corpus = Corpus::default();
    let mut group = c.benchmark_group("sliding_window_k8");

    for algo in HashAlgorithm::ALL {
        group.bench_function(algo.name(), |b| {
            b.iter(|| algo.run_trial(&corpus, 8, black_box(1000)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hashing, bench_sliding_window);
criterion_main!(benches);
