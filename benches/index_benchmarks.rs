use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use parkspot::{Coordinate, IndexConfig, Node, QueryRect, SpatialIndex, Tolerance};

fn grid(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            let lat = 37.0 + (i % 1000) as f64 * 0.001;
            let lon = -122.0 - (i / 1000) as f64 * 0.001;
            Coordinate::new(lat, lon)
        })
        .collect()
}

fn benchmark_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_operations");

    for size in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("insert", size), &size, |b, &size| {
            b.iter(|| {
                let root: Node<f64> = (0..size).map(|i| i as f64).collect();
                black_box(root)
            })
        });

        let root: Node<f64> = (0..size).map(|i| i as f64).collect();
        group.bench_with_input(BenchmarkId::new("remove", size), &root, |b, root| {
            b.iter(|| root.remove(black_box(&((size / 2) as f64)), Tolerance::new(0.5)))
        });
        group.bench_with_input(BenchmarkId::new("range_values", size), &root, |b, root| {
            b.iter(|| root.range_values(black_box(100.0), black_box(200.0), Tolerance::exact()))
        });
    }

    group.finish();
}

fn benchmark_index_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_queries");

    let rect = QueryRect::new(
        Coordinate::new(37.2, -122.005),
        Coordinate::new(37.1, -122.0),
    );

    for tolerance in [0.0, 0.01, 5.0] {
        let config = IndexConfig::default().with_query_tolerance(tolerance);
        let index = SpatialIndex::with_spots(config, grid(10_000));
        group.bench_with_input(
            BenchmarkId::new("query_10k", tolerance),
            &index,
            |b, index| b.iter(|| index.query(black_box(&rect))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_tree_operations, benchmark_index_queries);
criterion_main!(benches);
