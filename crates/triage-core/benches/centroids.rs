//! Benchmarks for centroid averaging and nearest-centroid lookup.
//!
//! Run with: cargo bench -p triage-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use triage_core::math::element_mean;
use triage_core::{classify, rank, CentroidSet};

/// ResNet50 pooled output length.
const DIM: usize = 2048;

fn random_vectors(rng: &mut StdRng, count: usize, dim: usize) -> Vec<Vec<f32>> {
    (0..count)
        .map(|_| (0..dim).map(|_| rng.gen_range(0.0..10.0)).collect())
        .collect()
}

fn random_centroids(rng: &mut StdRng, classes: usize) -> CentroidSet {
    let mut set = CentroidSet::new();
    for (i, vector) in random_vectors(rng, classes, DIM).into_iter().enumerate() {
        set.insert(format!("class_{i:03}"), vector, 1).unwrap();
    }
    set
}

fn benchmark_element_mean(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let vectors = random_vectors(&mut rng, 200, DIM);

    c.bench_function("element_mean_200x2048", |b| {
        b.iter(|| element_mean(black_box(&vectors)))
    });
}

fn benchmark_classify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let query = random_vectors(&mut rng, 1, DIM).remove(0);

    let mut group = c.benchmark_group("classify");
    for classes in [2usize, 20, 200] {
        let centroids = random_centroids(&mut rng, classes);
        group.bench_with_input(BenchmarkId::from_parameter(classes), &centroids, |b, set| {
            b.iter(|| classify(black_box(&query), black_box(set)))
        });
    }
    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let query = random_vectors(&mut rng, 1, DIM).remove(0);
    let centroids = random_centroids(&mut rng, 200);

    c.bench_function("rank_200_classes", |b| {
        b.iter(|| rank(black_box(&query), black_box(&centroids)))
    });
}

criterion_group!(
    benches,
    benchmark_element_mean,
    benchmark_classify,
    benchmark_rank
);
criterion_main!(benches);
