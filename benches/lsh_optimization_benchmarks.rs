//! LSH performance benchmarks.
//!
//! Validates that the banded index keeps `find_similar` sub-linear in the
//! corpus size in practice, and tracks the cost of the two building blocks
//! that dominate `Add`: signature construction and band compression.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use minhash_lsh::MinHasher;

fn sample_document(seed: usize) -> String {
    format!(
        "the quick brown fox jumps over the lazy dog near the riverbank \
         while document {seed} describes event {seed} in careful detail \
         and references entity {} and location {}",
        seed % 13,
        seed % 7,
    )
}

fn build_index(count: usize) -> MinHasher {
    let index = MinHasher::new(16, 8, 3).expect("valid parameters");
    for i in 0..count {
        index.add(format!("doc-{i}"), sample_document(i).as_bytes());
    }
    index
}

fn benchmark_find_similar_scales_with_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_similar_by_corpus_size");

    for &count in &[10usize, 100, 1_000] {
        let index = build_index(count);
        let query = sample_document(count / 2);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(index.find_similar(query.as_bytes(), 0.5)));
        });
    }

    group.finish();
}

fn benchmark_add_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_throughput");

    group.bench_function("single_add_into_warm_index", |b| {
        let index = build_index(500);
        let mut i = 500;
        b.iter(|| {
            index.add(format!("doc-{i}"), sample_document(i).as_bytes());
            i += 1;
        });
    });

    group.bench_function("add_many_parallel_signatures", |b| {
        b.iter_batched(
            || {
                let docs: Vec<(String, Vec<u8>)> = (0..200)
                    .map(|i| (format!("batch-{i}"), sample_document(i).into_bytes()))
                    .collect();
                (MinHasher::new(16, 8, 3).unwrap(), docs)
            },
            |(index, docs)| {
                index.add_many(docs);
                black_box(index.len())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn benchmark_band_cache_rebuild(c: &mut Criterion) {
    c.bench_function("band_cache_cold_rebuild", |b| {
        b.iter_batched(
            || build_index(1_000),
            |index| black_box(index.find_similar(sample_document(0).as_bytes(), 0.5)),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_find_similar_scales_with_corpus,
    benchmark_add_throughput,
    benchmark_band_cache_rebuild,
);
criterion_main!(benches);
