//! Criterion benchmarks for `MultiDict` insert/find/rehash/scan.
//!
//! Run with:
//!   cargo bench --bench multidict

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datakit_core::dict::{MultiDict, VecSlot};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("multidict_insert");

    for &n in &[1_000u64, 10_000] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::new("add", n), &n, |b, &n| {
            b.iter(|| {
                let mut d: MultiDict<VecSlot<u64>, u64> = MultiDict::new(0, false);
                for i in 0..n {
                    d.add(i.to_le_bytes().to_vec(), i);
                }
                d
            })
        });
    }

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("multidict_find");
    let n = 10_000u64;
    let mut d: MultiDict<VecSlot<u64>, u64> = MultiDict::new(0, false);
    for i in 0..n {
        d.add(i.to_le_bytes().to_vec(), i);
    }

    group.throughput(Throughput::Elements(n));
    group.bench_function("find_all_present", |b| {
        b.iter(|| {
            for i in 0..n {
                criterion::black_box(d.find(&i.to_le_bytes()));
            }
        })
    });

    group.finish();
}

fn bench_rehash_to_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("multidict_rehash");
    let n = 10_000u64;

    group.bench_function("resize_then_drain", |b| {
        b.iter(|| {
            let mut d: MultiDict<VecSlot<u64>, u64> = MultiDict::new(0, false);
            for i in 0..n {
                d.add(i.to_le_bytes().to_vec(), i);
            }
            d.resize();
            while d.state() != datakit_core::dict::DictState::Steady {
                d.rehash(1);
            }
            d
        })
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("multidict_scan");
    let n = 10_000u64;
    let mut d: MultiDict<VecSlot<u64>, u64> = MultiDict::new(0, false);
    for i in 0..n {
        d.add(i.to_le_bytes().to_vec(), i);
    }

    group.throughput(Throughput::Elements(n));
    group.bench_function("full_scan", |b| {
        b.iter(|| {
            let mut cursor = 0u64;
            let mut visited = 0u64;
            loop {
                cursor = d.scan(cursor, &mut |_, _| visited += 1);
                if cursor == 0 {
                    break;
                }
            }
            visited
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_rehash_to_completion, bench_scan);
criterion_main!(benches);
