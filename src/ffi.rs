//! UniFFI exports for the mobile and web shells.
//!
//! Thin wrappers around the library functions: they take owned values,
//! initialize platform logging and log what they did.

use log::{debug, info};

use crate::{
    cluster_positions, compute_coverage, find_nearest_position, init_logging, polyline,
    position_tracks_on_route, ClusterConfig, CoverageResult, GeoPoint, RoadieError, RouteLeg,
    TrackCluster, TrackPosition, TrackTiming, TripOverlay,
};

/// Decode an encoded polyline.
#[uniffi::export]
pub fn decode_polyline(encoded: String) -> Result<Vec<GeoPoint>, RoadieError> {
    init_logging();
    let path = polyline::decode(&encoded)?;
    debug!("[RoadieRust] decode_polyline: {} points", path.len());
    Ok(path)
}

/// Encode a path as a polyline string.
#[uniffi::export]
pub fn encode_polyline(points: Vec<GeoPoint>) -> Result<String, RoadieError> {
    init_logging();
    polyline::encode(&points)
}

/// Place tracks on a route given its encoded polyline.
#[uniffi::export]
pub fn ffi_position_tracks(
    tracks: Vec<TrackTiming>,
    route_duration_seconds: f64,
    encoded_polyline: String,
) -> Result<Vec<TrackPosition>, RoadieError> {
    init_logging();
    let path = polyline::decode(&encoded_polyline)?;
    let positions = position_tracks_on_route(&tracks, route_duration_seconds, &path);
    info!(
        "[RoadieRust] Positioned {} of {} tracks on {} route points",
        positions.len(),
        tracks.len(),
        path.len()
    );
    Ok(positions)
}

/// Coverage split of a route for a playlist duration.
#[uniffi::export]
pub fn ffi_compute_coverage(
    encoded_polyline: String,
    playlist_duration_ms: u64,
    route_duration_seconds: f64,
) -> Result<CoverageResult, RoadieError> {
    init_logging();
    let path = polyline::decode(&encoded_polyline)?;
    compute_coverage(&path, playlist_duration_ms, route_duration_seconds)
}

/// Cluster track markers for a zoom level.
#[uniffi::export]
pub fn ffi_cluster_positions(
    positions: Vec<TrackPosition>,
    zoom: u32,
    config: ClusterConfig,
) -> Vec<TrackCluster> {
    init_logging();
    cluster_positions(&positions, zoom, &config)
}

/// Track marker under a map tap, if any.
#[uniffi::export]
pub fn ffi_find_nearest_track(
    positions: Vec<TrackPosition>,
    tap: GeoPoint,
    max_distance_meters: f64,
) -> Option<TrackPosition> {
    init_logging();
    find_nearest_position(&positions, &tap, max_distance_meters).cloned()
}

/// Build the complete map overlay for a route leg and playlist.
#[uniffi::export]
pub fn ffi_build_trip_overlay(
    leg: RouteLeg,
    tracks: Vec<TrackTiming>,
) -> Result<TripOverlay, RoadieError> {
    init_logging();
    let start = std::time::Instant::now();
    let overlay = TripOverlay::build(&leg, &tracks)?;
    info!(
        "[RoadieRust] Built trip overlay in {:?} ({} positions)",
        start.elapsed(),
        overlay.positions.len()
    );
    Ok(overlay)
}

/// Get default clustering configuration.
#[uniffi::export]
pub fn default_cluster_config() -> ClusterConfig {
    init_logging();
    ClusterConfig::default()
}
