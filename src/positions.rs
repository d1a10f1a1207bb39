//! Track positioning along a route.
//!
//! Each track starts playing once every track before it has finished, so its
//! start time is the running sum of the previous durations. Dividing by the
//! route's driving time gives the fraction of the route at which the track
//! starts, and [`PathProfile::point_at`] turns that fraction into a map
//! coordinate.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::interpolation::PathProfile;
use crate::{GeoPoint, TrackTiming};

/// Where (and when) a track starts playing on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackPosition {
    /// The track being placed
    pub track: TrackTiming,
    /// Elapsed playlist time when the track starts
    pub cumulative_time_ms: u64,
    /// Start time as a fraction of the route duration (0.0 = departure)
    pub fraction_along_route: f64,
    /// Resolved map coordinate, set by [`resolve_coordinates`]
    pub position: Option<GeoPoint>,
}

/// Compute when each track starts and how far along the route that is.
///
/// Tracks that would start after the route ends (fraction above 1.0) are
/// left out. A track starting exactly on arrival is kept. Returns an empty
/// list when the route duration is not a positive, finite number.
///
/// ```rust
/// use roadie_route::{compute_positions, TrackTiming};
///
/// let tracks = vec![
///     TrackTiming::new("a", 200_000),
///     TrackTiming::new("b", 180_000),
///     TrackTiming::new("c", 220_000),
/// ];
/// let positions = compute_positions(&tracks, 600.0);
/// assert_eq!(positions.len(), 3);
/// assert_eq!(positions[1].cumulative_time_ms, 200_000);
/// ```
pub fn compute_positions(tracks: &[TrackTiming], route_duration_seconds: f64) -> Vec<TrackPosition> {
    if !(route_duration_seconds.is_finite() && route_duration_seconds > 0.0) {
        warn!(
            "[Positions] Ignoring {} tracks: route duration {} s is not usable",
            tracks.len(),
            route_duration_seconds
        );
        return Vec::new();
    }

    let route_duration_ms = route_duration_seconds * 1000.0;
    let mut cumulative_ms: u64 = 0;
    let mut positions = Vec::with_capacity(tracks.len());

    for track in tracks {
        let fraction = cumulative_ms as f64 / route_duration_ms;
        if fraction <= 1.0 {
            positions.push(TrackPosition {
                track: track.clone(),
                cumulative_time_ms: cumulative_ms,
                fraction_along_route: fraction,
                position: None,
            });
        }
        cumulative_ms = cumulative_ms.saturating_add(track.duration_ms);
    }

    debug!(
        "[Positions] {} of {} tracks start before arrival ({:.0} s route)",
        positions.len(),
        tracks.len(),
        route_duration_seconds
    );
    positions
}

/// Attach a map coordinate to every position.
///
/// Positions whose coordinate cannot be resolved (empty path) are dropped
/// rather than returned without one. The path is measured once for the whole
/// batch.
pub fn resolve_coordinates(positions: &[TrackPosition], path: &[GeoPoint]) -> Vec<TrackPosition> {
    let profile = PathProfile::new(path);
    positions
        .iter()
        .filter_map(|pos| resolve_one(&profile, pos))
        .collect()
}

/// Parallel version of [`resolve_coordinates`] with identical output order.
#[cfg(feature = "parallel")]
pub fn resolve_coordinates_parallel(
    positions: &[TrackPosition],
    path: &[GeoPoint],
) -> Vec<TrackPosition> {
    use rayon::prelude::*;

    let profile = PathProfile::new(path);
    positions
        .par_iter()
        .filter_map(|pos| resolve_one(&profile, pos))
        .collect()
}

/// Compute positions and resolve their coordinates in one step.
pub fn position_tracks_on_route(
    tracks: &[TrackTiming],
    route_duration_seconds: f64,
    path: &[GeoPoint],
) -> Vec<TrackPosition> {
    let positions = compute_positions(tracks, route_duration_seconds);

    #[cfg(feature = "parallel")]
    let resolved = resolve_coordinates_parallel(&positions, path);

    #[cfg(not(feature = "parallel"))]
    let resolved = resolve_coordinates(&positions, path);

    resolved
}

fn resolve_one(profile: &PathProfile<'_>, pos: &TrackPosition) -> Option<TrackPosition> {
    let point = profile.point_at(pos.fraction_along_route)?;
    Some(TrackPosition {
        position: Some(point),
        ..pos.clone()
    })
}
