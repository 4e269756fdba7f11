//! Keyword expansion benchmarks.
//!
//! The expander is a linear scan over every mapping key per call, so the
//! interesting axis is mapping-table size. The debounce keeps it off the
//! per-keystroke hot path, but a full-table miss (the fallback case) is
//! the worst case and must stay comfortably sub-millisecond.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `expand/hit` | A query matching one key near the end of the table |
//! | `expand/miss` | The fallback path: no key matches, full scan |
//! | `expand/multi` | A query containing several keys |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench expand_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use miru_core::KeywordMap;
use std::hint::black_box;

/// Build a map of `n` synthetic Japanese-ish keys plus a few real ones at
/// the end, each with two English terms.
fn build_map(n: usize) -> KeywordMap {
    let mut entries: Vec<(String, Vec<String>)> = (0..n)
        .map(|i| {
            (
                format!("キー{i}"),
                vec![format!("term-{i}-a"), format!("term-{i}-b")],
            )
        })
        .collect();
    entries.push(("猫".to_string(), vec!["cat".to_string(), "kitten".to_string()]));
    entries.push(("犬".to_string(), vec!["dog".to_string()]));
    KeywordMap::from_entries(entries)
}

fn hit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand/hit");
    for size in [16usize, 128, 1024] {
        let map = build_map(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, map| {
            b.iter(|| black_box(map.expand(black_box("猫"))))
        });
    }
    group.finish();
}

fn miss_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand/miss");
    for size in [16usize, 128, 1024] {
        let map = build_map(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, map| {
            b.iter(|| black_box(map.expand(black_box("unmapped query text"))))
        });
    }
    group.finish();
}

fn multi_key_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand/multi");
    let map = build_map(128);
    group.bench_function("two_keys_128_table", |b| {
        b.iter(|| black_box(map.expand(black_box("猫と犬の写真"))))
    });
    group.finish();
}

criterion_group!(benches, hit_bench, miss_bench, multi_key_bench);
criterion_main!(benches);
