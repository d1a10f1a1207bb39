//! Benchmarks for decoding, positioning and clustering on long synthetic routes.
//!
//! Run with: `cargo bench --bench route_overlay`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roadie_route::{
    cluster_positions, compute_coverage, polyline, position_tracks_on_route, ClusterConfig,
    GeoPoint, TrackTiming,
};

/// A meandering route of `n` points heading north-east.
fn synthetic_route(n: usize) -> Vec<GeoPoint> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            GeoPoint::new(45.0 + t * 0.002, 7.0 + t * 0.003 + (t * 0.1).sin() * 0.001)
        })
        .collect()
}

fn synthetic_playlist(n: usize) -> Vec<TrackTiming> {
    (0..n)
        .map(|i| TrackTiming::new(format!("track-{i}"), 150_000 + (i as u64 % 7) * 20_000))
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline_decode");

    for size in [100, 1_000, 10_000] {
        let encoded = polyline::encode(&synthetic_route(size)).expect("synthetic route encodes");
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| polyline::decode(black_box(encoded)))
        });
    }

    group.finish();
}

fn bench_positioning(c: &mut Criterion) {
    let route = synthetic_route(5_000);
    let mut group = c.benchmark_group("position_tracks");

    for tracks in [10, 100, 1_000] {
        let playlist = synthetic_playlist(tracks);
        group.bench_with_input(BenchmarkId::from_parameter(tracks), &playlist, |b, playlist| {
            b.iter(|| position_tracks_on_route(black_box(playlist), 36_000.0, &route))
        });
    }

    group.finish();
}

fn bench_coverage_and_clusters(c: &mut Criterion) {
    let route = synthetic_route(5_000);
    let positions = position_tracks_on_route(&synthetic_playlist(500), 36_000.0, &route);
    let config = ClusterConfig::default();

    c.bench_function("compute_coverage_5000pts", |b| {
        b.iter(|| compute_coverage(black_box(&route), 18_000_000, 36_000.0))
    });

    let mut group = c.benchmark_group("cluster_positions");
    for zoom in [3u32, 6, 9, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(zoom), &zoom, |b, &zoom| {
            b.iter(|| cluster_positions(black_box(&positions), zoom, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_positioning, bench_coverage_and_clusters);
criterion_main!(benches);
