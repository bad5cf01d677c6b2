// Lookup performance benchmarks for BloomStore

use bloomstore::{BloomFilter, MemoryBloomFilter};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn benchmark_has_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_hit");

    for size in [1000, 10000, 100000].iter() {
        let mut filter = MemoryBloomFilter::new(64 << 20, 5).unwrap();

        // Pre-populate data
        for i in 0..*size {
            let key = format!("key{:08}", i);
            filter.put(key.as_bytes()).unwrap();
        }

        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                for i in 0..1000 {
                    let key = format!("key{:08}", i);
                    black_box(filter.has(key.as_bytes()).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_has_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_miss");
    let mut filter = MemoryBloomFilter::new(64 << 20, 5).unwrap();

    for i in 0..10000 {
        let key = format!("key{:08}", i);
        filter.put(key.as_bytes()).unwrap();
    }

    group.throughput(Throughput::Elements(1000));
    group.bench_function("absent_keys", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let key = format!("missing{:08}", i);
                black_box(filter.has(key.as_bytes()).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_has_hit, benchmark_has_miss);
criterion_main!(benches);
