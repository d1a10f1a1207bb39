//! # Roadie Route
//!
//! Route coverage and track positioning geometry for road-trip playlists.
//!
//! This library provides:
//! - Encoded polyline decoding (and encoding)
//! - Placement of playlist tracks along a route by elapsed time
//! - Splitting a route into the part a playlist covers and the part it doesn't
//! - Zoom-dependent clustering of track markers
//!
//! Everything is a pure function over plain data: no I/O, no shared state.
//!
//! ## Features
//!
//! - **`parallel`** - Resolve track coordinates in parallel with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use roadie_route::{ClusterConfig, RouteLeg, TrackTiming, TripOverlay};
//!
//! let leg = RouteLeg {
//!     encoded_polyline: "_p~iF~ps|U_ulLnnqC_mqNvxq`@".to_string(),
//!     duration_seconds: 1_200.0,
//!     distance_meters: None,
//! };
//! let tracks = vec![
//!     TrackTiming::new("track-1", 200_000),
//!     TrackTiming::new("track-2", 180_000),
//!     TrackTiming::new("track-3", 220_000),
//! ];
//!
//! let overlay = TripOverlay::build(&leg, &tracks).unwrap();
//! for pos in &overlay.positions {
//!     println!("{} starts {:.0}% along the route", pos.track.track_id, pos.fraction_along_route * 100.0);
//! }
//! if let Some(coverage) = &overlay.coverage {
//!     println!("{}", coverage.summary());
//! }
//! let markers = overlay.clusters(6, &ClusterConfig::default());
//! assert!(!markers.is_empty());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, RoadieError};

// Geographic utilities (distance, bounds, center calculations)
pub mod geo_utils;

// Encoded polyline codec
pub mod polyline;

// Distance-weighted interpolation and path splitting
pub mod interpolation;
pub use interpolation::{interpolate, split_at_fraction, PathProfile};

// Track start times and their coordinates on the route
pub mod positions;
#[cfg(feature = "parallel")]
pub use positions::resolve_coordinates_parallel;
pub use positions::{compute_positions, position_tracks_on_route, resolve_coordinates, TrackPosition};

// Playlist coverage of a route
pub mod coverage;
pub use coverage::{compute_coverage, coverage_fraction, gap_minutes, CoverageResult};

// Marker clustering and lookup
pub mod clustering;
pub use clustering::{
    cluster_positions, find_nearest_position, ClusterConfig, MarkerIndex, TrackCluster, ZoomBand,
};

// Whole-trip overlay pipeline
pub mod trip;
pub use trip::{RouteLeg, TripOverlay};

// Time labels
pub mod format;

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RoadieRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use roadie_route::GeoPoint;
/// let point = GeoPoint::new(38.5, -120.2);
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A playlist entry as seen by the route geometry: an id and a duration.
///
/// The track's metadata (title, artwork, ...) stays with the caller and is
/// looked up by `track_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackTiming {
    /// Caller's identifier for the track
    pub track_id: String,
    /// Playback length in milliseconds
    pub duration_ms: u64,
}

impl TrackTiming {
    /// Create a new track timing.
    pub fn new(track_id: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            track_id: track_id.into(),
            duration_ms,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(38.5, -120.2).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::from_points(&[GeoPoint::new(38.0, -122.0), GeoPoint::new(40.0, -120.0)])
            .unwrap();
        assert_eq!(bounds.center(), GeoPoint::new(39.0, -121.0));
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_track_timing_new() {
        let track = TrackTiming::new("abc", 215_000);
        assert_eq!(track.track_id, "abc");
        assert_eq!(track.duration_ms, 215_000);
    }

    #[test]
    fn test_canonical_polyline_end_to_end() {
        let path = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_eq!(interpolate(&path, 0.0), Some(path[0]));
        assert_eq!(interpolate(&path, 1.0), Some(path[2]));

        let (covered, uncovered) = split_at_fraction(&path, 0.3);
        assert_eq!(covered.first(), path.first());
        assert_eq!(uncovered.last(), path.last());
    }
}
