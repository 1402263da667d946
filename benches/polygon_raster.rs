//! Benchmarks for the scanline polygon rasterizer.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polygon_raster::{FillingRule, PolygonRaster, PolygonStorage, SpanStorage, SpanStorageHigh};

/// Regular polygon with `n` vertices, flagged convex.
fn regular(n: usize, radius: f64) -> PolygonStorage {
    let mut path = PolygonStorage::new();
    for k in 0..n {
        let a = (k as f64 / n as f64) * std::f64::consts::TAU;
        let (x, y) = (radius + radius * a.cos(), radius + radius * a.sin());
        if k == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_polygon();
    path.set_convex(true);
    path
}

/// Self-intersecting star with `points` tips.
fn star(points: usize, radius: f64) -> PolygonStorage {
    let mut path = PolygonStorage::new();
    let step = (points / 2).max(1);
    for k in 0..points {
        let a = ((k * step) as f64 / points as f64) * std::f64::consts::TAU;
        let (x, y) = (radius + radius * a.cos(), radius + radius * a.sin());
        if k == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_polygon();
    path
}

fn bench_convex(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex");
    for n in [4usize, 32, 256] {
        let path = regular(n, 200.0);
        let bounds = path.bounds().unwrap();
        let mut raster = PolygonRaster::new();
        let mut spans = SpanStorage::new();
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| {
                spans.clear();
                raster
                    .rasterize(
                        black_box(&path.as_polygon()),
                        &bounds,
                        FillingRule::NonZero,
                        &mut spans,
                    )
                    .unwrap();
                black_box(spans.len())
            })
        });
    }
    group.finish();
}

fn bench_concave(c: &mut Criterion) {
    let mut group = c.benchmark_group("concave_star");
    for tips in [5usize, 17, 101] {
        let path = star(tips, 200.0);
        let bounds = path.bounds().unwrap();
        let mut raster = PolygonRaster::new();
        let mut spans = SpanStorage::new();
        for rule in [FillingRule::NonZero, FillingRule::EvenOdd] {
            let id = BenchmarkId::new(format!("{:?}", rule), tips);
            group.bench_with_input(id, &path, |b, path| {
                b.iter(|| {
                    spans.clear();
                    raster
                        .rasterize(black_box(&path.as_polygon()), &bounds, rule, &mut spans)
                        .unwrap();
                    black_box(spans.len())
                })
            });
        }
    }
    group.finish();
}

fn bench_high_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("high_precision");
    let path = star(17, 200.0);
    let bounds = path.bounds().unwrap();
    for shift in [0u32, 2, 4] {
        let mut raster = PolygonRaster::new();
        raster.sample_shift(shift);
        let mut spans = SpanStorageHigh::new();
        group.bench_with_input(BenchmarkId::from_parameter(shift), &path, |b, path| {
            b.iter(|| {
                spans.clear();
                raster
                    .rasterize_high(
                        black_box(&path.as_polygon()),
                        &bounds,
                        FillingRule::NonZero,
                        &mut spans,
                    )
                    .unwrap();
                black_box(spans.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convex, bench_concave, bench_high_precision);
criterion_main!(benches);
