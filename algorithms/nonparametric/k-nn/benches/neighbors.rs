use canvas_helpers::{DataPoint, L2Dist};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use k_nn::{ClassificationParameters, KnnClassifier, find_k_closest};
use ndarray::{Array2, array};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

fn store(n: usize) -> Vec<DataPoint<usize, f64>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    Array2::random_using((n, 2), Uniform::new(0.0, 800.0), &mut rng)
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| DataPoint::new(row.to_owned(), i % 4))
        .collect()
}

fn bench_find_k_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_k_closest");
    for n in [100, 1_000, 10_000] {
        let points = store(n);
        let query = array![400.0, 300.0];
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| find_k_closest(black_box(query.view()), points, 7, None, &L2Dist))
        });
    }
    group.finish();
}

fn bench_classify_weighted(c: &mut Criterion) {
    let points = store(1_000);
    let classifier = KnnClassifier::new(L2Dist);
    let params = ClassificationParameters::new(15).unwrap().with_weighted(true);
    let query = array![120.0, 640.0];
    c.bench_function("classify_weighted_1000", |b| {
        b.iter(|| classifier.classify(black_box(query.view()), &points, None, &params))
    });
}

criterion_group!(benches, bench_find_k_closest, bench_classify_weighted);
criterion_main!(benches);
