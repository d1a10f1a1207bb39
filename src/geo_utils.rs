//! # Geographic Utilities
//!
//! Distance and extent helpers shared by the interpolation, coverage and
//! clustering modules.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`path_length`] | Total length of a path in meters |
//! | [`cumulative_distances`] | Running distance at every vertex of a path |
//! | [`compute_bounds`] | Bounding box of a path |
//! | [`compute_center`] | Centroid of a path |
//!
//! ## Example
//!
//! ```rust
//! use roadie_route::{GeoPoint, geo_utils};
//!
//! let route = vec![
//!     GeoPoint::new(38.5, -120.2),
//!     GeoPoint::new(40.7, -120.95),
//!     GeoPoint::new(43.252, -126.453),
//! ];
//!
//! let length = geo_utils::path_length(&route);
//! println!("Route length: {:.0} km", length / 1000.0);
//!
//! let bounds = geo_utils::compute_bounds(&route).unwrap();
//! println!("Bounds: {:.3}N to {:.3}N", bounds.min_lat, bounds.max_lat);
//! ```
//!
//! ## Algorithm Notes
//!
//! Distances use the haversine formula on a spherical Earth (radius 6,371 km)
//! via the `geo` crate. Interpolation between vertices is done in raw
//! latitude/longitude space, which is accurate enough at road-segment scale.

use geo::{Distance, Haversine, Point};

use crate::{Bounds, GeoPoint};

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// Returns the distance in meters along the Earth's surface.
///
/// # Example
///
/// ```rust
/// use roadie_route::{GeoPoint, geo_utils};
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Calculate the total length of a path in meters.
///
/// Sums the haversine distance between consecutive points. Empty or single-point
/// paths return 0.0.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Running distance from the first vertex to every vertex of a path.
///
/// The result has one entry per input point, starts at 0.0 and is
/// non-decreasing. The last entry equals [`path_length`].
///
/// ```rust
/// use roadie_route::{GeoPoint, geo_utils};
///
/// let path = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 1.0),
///     GeoPoint::new(0.0, 1.0),
/// ];
/// let cumulative = geo_utils::cumulative_distances(&path);
/// assert_eq!(cumulative.len(), 3);
/// assert_eq!(cumulative[0], 0.0);
/// assert_eq!(cumulative[1], cumulative[2]);
/// ```
pub fn cumulative_distances(points: &[GeoPoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    if points.is_empty() {
        return distances;
    }

    let mut total = 0.0;
    distances.push(total);
    for w in points.windows(2) {
        total += haversine_distance(&w[0], &w[1]);
        distances.push(total);
    }
    distances
}

// =============================================================================
// Extent Functions
// =============================================================================

/// Compute the bounding box of a path.
///
/// Returns `None` for an empty path. Used by map shells to fit the viewport
/// to the decoded route.
pub fn compute_bounds(points: &[GeoPoint]) -> Option<Bounds> {
    Bounds::from_points(points)
}

/// Compute the geographic center (centroid) of a path.
///
/// Returns the arithmetic mean of all latitude and longitude values, or (0, 0)
/// for empty input. Routes crossing the antimeridian are not handled.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let sum_lat: f64 = points.iter().map(|p| p.latitude).sum();
    let sum_lng: f64 = points.iter().map(|p| p.longitude).sum();
    let n = points.len() as f64;

    GeoPoint::new(sum_lat / n, sum_lng / n)
}

// =============================================================================
// Unit Tests
// =============================================================================
