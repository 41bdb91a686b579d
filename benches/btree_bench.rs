//! Build and search benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bptindex::{BPlusTree, IndexConfig, Key, QueryKey, Record};

const RECORDS: usize = 100_000;

fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let i = i as i64;
            Record::new(
                Key::from((format!("name{:06}", i / 20), i % 20, "show", i % 7)),
                format!("p{}", i / 50),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let input = records(RECORDS);
    let mut group = c.benchmark_group("build");
    for capacity in [4, 60, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            b.iter(|| BPlusTree::build(input.clone(), IndexConfig::new(cap)).unwrap())
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let tree = BPlusTree::build(records(RECORDS), IndexConfig::default()).unwrap();
    let exact = QueryKey::from(("name002500", 7, "show", 6));
    let prefix = QueryKey::from(("name002500", "*", "*", "*"));
    let suffix = QueryKey::from(("*", 3, "*", "*"));

    c.bench_function("search/full_equality", |b| {
        b.iter(|| tree.search(black_box(&exact)).unwrap().len())
    });
    c.bench_function("search/wildcard_prefix", |b| {
        b.iter(|| tree.search(black_box(&prefix)).unwrap().len())
    });
    c.bench_function("search/wildcard_full_scan", |b| {
        b.iter(|| tree.search(black_box(&suffix)).unwrap().len())
    });
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
