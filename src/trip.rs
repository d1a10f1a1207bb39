//! Trip overlay: everything the map needs for one route and one playlist.
//!
//! Runs the whole pipeline in one call: decode the leg polyline, measure it,
//! place every track on it and split it by playlist coverage. Clusters depend
//! on the current zoom level and are computed separately via
//! [`TripOverlay::clusters`], so zooming never re-decodes the route.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::clustering::{cluster_positions, ClusterConfig, TrackCluster};
use crate::coverage::{compute_coverage, CoverageResult};
use crate::error::{check_route_duration, Result};
use crate::geo_utils::{compute_bounds, path_length};
use crate::positions::{position_tracks_on_route, TrackPosition};
use crate::{polyline, Bounds, GeoPoint, TrackTiming};

/// The part of a directions-API route leg the overlay is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct RouteLeg {
    /// Encoded overview polyline of the route
    pub encoded_polyline: String,
    /// Estimated driving time in seconds
    pub duration_seconds: f64,
    /// Route distance in meters as reported by the directions API, if known.
    /// Used as the route length when the polyline has no measurable length.
    pub distance_meters: Option<f64>,
}

/// Map overlay for a route and playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TripOverlay {
    /// Decoded route
    pub path: Vec<GeoPoint>,
    /// Bounding box for fitting the map viewport, `None` for an empty route
    pub bounds: Option<Bounds>,
    /// Route length in meters, measured along the path
    pub path_length_meters: f64,
    /// Tracks that start before arrival, with coordinates
    pub positions: Vec<TrackPosition>,
    /// Coverage split, `None` when there is no playlist
    pub coverage: Option<CoverageResult>,
}

impl TripOverlay {
    /// Build the overlay for a route leg and the ordered playlist tracks.
    ///
    /// # Errors
    ///
    /// Fails when the leg's duration is unusable or its polyline is malformed.
    pub fn build(leg: &RouteLeg, tracks: &[TrackTiming]) -> Result<Self> {
        let route_duration_seconds = check_route_duration(leg.duration_seconds)?;
        let path = polyline::decode(&leg.encoded_polyline)?;

        let positions = position_tracks_on_route(tracks, route_duration_seconds, &path);

        let coverage = if tracks.is_empty() {
            None
        } else {
            let playlist_duration_ms = tracks
                .iter()
                .fold(0u64, |total, t| total.saturating_add(t.duration_ms));
            Some(compute_coverage(&path, playlist_duration_ms, route_duration_seconds)?)
        };

        let path_length_meters = route_length(&path, leg.distance_meters);
        info!(
            "[Trip] {} route points ({:.1} km), {} of {} tracks placed, coverage {}",
            path.len(),
            path_length_meters / 1000.0,
            positions.len(),
            tracks.len(),
            coverage
                .as_ref()
                .map_or_else(|| "n/a".to_string(), |c| format!("{}%", c.percent()))
        );

        Ok(Self {
            bounds: compute_bounds(&path),
            path,
            path_length_meters,
            positions,
            coverage,
        })
    }

    /// Marker clusters for a zoom level.
    pub fn clusters(&self, zoom: u32, config: &ClusterConfig) -> Vec<TrackCluster> {
        cluster_positions(&self.positions, zoom, config)
    }
}

/// Reported and measured lengths further apart than this are logged.
const LENGTH_MISMATCH_RATIO: f64 = 0.25;

/// Length of the decoded path, falling back to the reported distance when
/// the path is empty or a single point.
fn route_length(path: &[GeoPoint], reported_meters: Option<f64>) -> f64 {
    let measured = path_length(path);
    let Some(reported) = reported_meters.filter(|d| d.is_finite() && *d > 0.0) else {
        return measured;
    };

    if measured <= 0.0 {
        return reported;
    }
    if (measured - reported).abs() / reported > LENGTH_MISMATCH_RATIO {
        warn!(
            "[Trip] Polyline measures {:.0} m but the leg reports {:.0} m",
            measured, reported
        );
    }
    measured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoadieError;

    fn leg(duration_seconds: f64) -> RouteLeg {
        RouteLeg {
            encoded_polyline: "_p~iF~ps|U_ulLnnqC_mqNvxq`@".to_string(),
            duration_seconds,
            distance_meters: None,
        }
    }

    fn tracks() -> Vec<TrackTiming> {
        vec![
            TrackTiming::new("a", 200_000),
            TrackTiming::new("b", 180_000),
            TrackTiming::new("c", 220_000),
        ]
    }

    #[test]
    fn test_build_overlay() {
        let overlay = TripOverlay::build(&leg(1_200.0), &tracks()).unwrap();

        assert_eq!(overlay.path.len(), 3);
        assert_eq!(overlay.positions.len(), 3);
        assert!(overlay.positions.iter().all(|p| p.position.is_some()));
        assert_eq!(overlay.positions[0].position, Some(overlay.path[0]));
        assert!(overlay.path_length_meters > 500_000.0);

        let bounds = overlay.bounds.unwrap();
        assert_eq!(bounds.min_lat, overlay.path[0].latitude);

        let coverage = overlay.coverage.unwrap();
        assert_eq!(coverage.coverage_fraction, 0.5);
        assert_eq!(coverage.gap_minutes, 10);
        assert!(coverage.end_point.is_some());
    }

    #[test]
    fn test_build_without_tracks() {
        let overlay = TripOverlay::build(&leg(600.0), &[]).unwrap();
        assert!(overlay.positions.is_empty());
        assert!(overlay.coverage.is_none());
        assert!(overlay.clusters(3, &ClusterConfig::default()).is_empty());
    }

    #[test]
    fn test_build_rejects_bad_input() {
        assert!(matches!(
            TripOverlay::build(&leg(0.0), &tracks()),
            Err(RoadieError::InvalidDuration { .. })
        ));

        let broken = RouteLeg {
            encoded_polyline: "_p~iF~ps|U_".to_string(),
            ..leg(600.0)
        };
        assert!(matches!(
            TripOverlay::build(&broken, &tracks()),
            Err(RoadieError::MalformedPolyline { .. })
        ));
    }

    #[test]
    fn test_reported_distance_fills_in_for_single_point_route() {
        let single = RouteLeg {
            encoded_polyline: "_p~iF~ps|U".to_string(),
            distance_meters: Some(1_234.0),
            ..leg(600.0)
        };
        let overlay = TripOverlay::build(&single, &tracks()).unwrap();
        assert_eq!(overlay.path.len(), 1);
        assert_eq!(overlay.path_length_meters, 1_234.0);

        let unreported = RouteLeg {
            distance_meters: None,
            ..single
        };
        let overlay = TripOverlay::build(&unreported, &tracks()).unwrap();
        assert_eq!(overlay.path_length_meters, 0.0);
    }

    #[test]
    fn test_measured_length_wins_over_reported() {
        let measured = TripOverlay::build(&leg(600.0), &tracks())
            .unwrap()
            .path_length_meters;
        let reported = RouteLeg {
            distance_meters: Some(10.0),
            ..leg(600.0)
        };
        let overlay = TripOverlay::build(&reported, &tracks()).unwrap();
        assert_eq!(overlay.path_length_meters, measured);
    }

    #[test]
    fn test_clusters_keep_endpoints() {
        let overlay = TripOverlay::build(&leg(600.0), &tracks()).unwrap();
        let clusters = overlay.clusters(2, &ClusterConfig::default());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters[1].head.track.track_id, "c");
    }
}
