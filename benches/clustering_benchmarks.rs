use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geotrip::{Coordinate, DistanceMetric, GeoPoint, ItemId, SpatialIndex, TripClusterer};

fn grid(n: usize) -> Vec<GeoPoint> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let lat = -23.70 + (i / side) as f64 * 0.002;
            let lng = -46.80 + (i % side) as f64 * 0.002;
            GeoPoint::new(ItemId(i as u64), format!("stop:{}", i), Coordinate::new(lat, lng))
        })
        .collect()
}

fn benchmark_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");

    let a = Coordinate::new(-23.5615, -46.6559);
    let b = Coordinate::new(-23.5874, -46.6576);

    for metric in [
        DistanceMetric::Haversine,
        DistanceMetric::Geodesic,
        DistanceMetric::Planar,
    ] {
        group.bench_function(format!("{:?}", metric), |bench| {
            bench.iter(|| metric.measure(black_box(&a), black_box(&b)))
        });
    }

    group.finish();
}

fn benchmark_index_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_operations");

    let index = SpatialIndex::new();
    group.bench_function("insert", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            let lat = -23.5 + ((counter % 1000) as f64 * 0.0001);
            let lng = -46.6 + ((counter / 1000 % 1000) as f64 * 0.0001);
            counter += 1;
            index
                .insert(GeoPoint::new(
                    ItemId(counter),
                    "bench",
                    Coordinate::new(lat, lng),
                ))
                .unwrap()
        })
    });

    let index = SpatialIndex::from_points(grid(10_000)).unwrap();
    let center = Coordinate::new(-23.60, -46.70);
    for radius in [500.0, 2_000.0, 10_000.0] {
        group.bench_with_input(
            BenchmarkId::new("radius_query", radius as u64),
            &radius,
            |b, &radius| b.iter(|| index.radius_query(black_box(&center), radius).unwrap()),
        );
    }

    group.bench_function("snapshot_10k", |b| b.iter(|| index.snapshot()));

    group.finish();
}

fn benchmark_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    group.sample_size(20);

    let clusterer = TripClusterer::new();
    for size in [100, 500, 2_000] {
        let points = grid(size);
        group.bench_with_input(BenchmarkId::new("build_trips", size), &points, |b, points| {
            b.iter(|| clusterer.build_trips(black_box(points), 10).unwrap().len())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_distance,
    benchmark_index_operations,
    benchmark_clustering
);
criterion_main!(benches);
