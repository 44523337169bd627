use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fishery_advisory::{build_dashboard, nearest, BucketGranularity, GeoPoint, Observation};

/// Deterministic grid of observations around the northern Indian Ocean
fn observations(n: usize) -> Vec<Observation> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let lat = (i % 30) as f64 + 0.37;
            let lon = 50.0 + (i % 50) as f64 + 0.11 * (i / 50) as f64;
            let date = start + chrono::Days::new((i % 365) as u64);
            Observation::new(date, GeoPoint::new(lat, lon), "Indian Ocean", 20.0 + (i % 70) as f64)
                .with_fish_stock(10.0 + (i % 80) as f64)
        })
        .collect()
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_point");
    for n in [500usize, 2_000, 5_000] {
        let rows = observations(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| nearest(black_box(GeoPoint::new(15.0, 80.0)), black_box(rows)))
        });
    }
    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let rows = observations(5_000);
    c.bench_function("build_dashboard_5000", |b| {
        b.iter(|| build_dashboard(black_box(&rows), BucketGranularity::Month))
    });
}

criterion_group!(benches, bench_nearest, bench_dashboard);
criterion_main!(benches);
