//! # Bloom Function Benchmarks
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `add` | k murmur positions, k bit writes |
//! | `contains` | k murmur positions, up to k bit reads |
//! | `build_filter` | n adds plus one serialization |
//! | `probe` | header validation plus one `contains` |
//! | `bloom_contains` via host | `probe` plus argument dispatch |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use bloom_core::domain::calculate_optimal_parameters;
use bloom_core::domain::hash_functions::murmur_hash2;
use bloom_core::{BloomConfig, BloomFilter};
use bloom_functions::{build_filter, probe, BloomFunctions, InMemoryHost, Value};

fn random_keys(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(4..32);
            (0..len).map(|_| rng.gen()).collect()
        })
        .collect()
}

// ============================================================================
// CORE FILTER
// ============================================================================

fn bench_filter_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter");
    group.measurement_time(Duration::from_secs(5));

    let keys = random_keys(1_000, 1);
    let mut filter = BloomConfig::default().create_filter().unwrap();

    group.bench_function("add_single", |b| {
        let mut i = 0;
        b.iter(|| {
            filter.add(black_box(&keys[i % keys.len()]));
            i += 1;
        })
    });

    let strangers = random_keys(1_000, 2);
    group.bench_function("contains_member", |b| {
        let mut i = 0;
        b.iter(|| {
            let found = filter.contains(black_box(&keys[i % keys.len()]));
            i += 1;
            black_box(found)
        })
    });
    group.bench_function("contains_stranger", |b| {
        let mut i = 0;
        b.iter(|| {
            let found = filter.contains(black_box(&strangers[i % strangers.len()]));
            i += 1;
            black_box(found)
        })
    });

    group.bench_function("optimal_parameters", |b| {
        b.iter(|| black_box(calculate_optimal_parameters(black_box(100_000), black_box(0.001))))
    });

    group.bench_function("murmurhash2", |b| {
        b.iter(|| black_box(murmur_hash2(black_box(b"charlie"), black_box(1337))))
    });

    group.finish();
}

// ============================================================================
// BUILD AND PROBE
// ============================================================================

fn bench_build_and_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-build-probe");
    group.measurement_time(Duration::from_secs(10));

    let config = BloomConfig::default();
    for count in [100, 1_000, 10_000] {
        let keys = random_keys(count, count as u64);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("build_filter", count), &keys, |b, keys| {
            b.iter(|| black_box(build_filter(keys, &config).unwrap()))
        });

        let bytes = build_filter(&keys, &config).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("deserialize", count), &bytes, |b, bytes| {
            b.iter(|| black_box(BloomFilter::deserialize(bytes).unwrap()))
        });

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("probe", count), &bytes, |b, bytes| {
            b.iter(|| black_box(probe(black_box(&keys[0]), bytes).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// HOST DISPATCH
// ============================================================================

fn bench_host_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-host");
    group.measurement_time(Duration::from_secs(5));

    let mut host = InMemoryHost::new();
    BloomFunctions::default().register(&mut host).unwrap();

    let rows: Vec<Vec<Value>> = (0..1_000)
        .map(|i| vec![Value::from(format!("row-{}", i))])
        .collect();

    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("aggregate_1000_rows", |b| {
        b.iter(|| black_box(host.aggregate("bloomfilter", 1, &rows).unwrap()))
    });

    let filter = host.aggregate("bloomfilter", 1, &rows).unwrap();
    let args = [Value::from("row-500"), filter];
    group.throughput(Throughput::Elements(1));
    group.bench_function("bloom_contains", |b| {
        b.iter(|| black_box(host.call_scalar("bloom_contains", black_box(&args)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filter_operations,
    bench_build_and_probe,
    bench_host_functions
);
criterion_main!(benches);
