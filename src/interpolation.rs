//! Distance-weighted interpolation along a path.
//!
//! A fraction of a route (0.0 = origin, 1.0 = destination) is turned into a
//! map coordinate by walking the path's cumulative haversine distance to the
//! segment containing `fraction * total_distance`, then interpolating linearly
//! in raw latitude/longitude between that segment's endpoints. The linear step
//! is a planar approximation, which is fine over the short segments of a
//! decoded road polyline.
//!
//! [`PathProfile`] precomputes the cumulative distances once so that a whole
//! playlist can be placed on the same route without re-measuring it per track.

use crate::geo_utils::cumulative_distances;
use crate::GeoPoint;

/// Where a fraction lands on a path: the first vertex at or beyond the target
/// distance, and the interpolated point on the segment leading up to it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitLocation {
    vertex: usize,
    point: GeoPoint,
}

/// A path with its cumulative vertex distances.
#[derive(Debug, Clone)]
pub struct PathProfile<'a> {
    points: &'a [GeoPoint],
    cumulative: Vec<f64>,
}

impl<'a> PathProfile<'a> {
    /// Measure a path once.
    pub fn new(points: &'a [GeoPoint]) -> Self {
        Self {
            points,
            cumulative: cumulative_distances(points),
        }
    }

    /// The underlying path.
    pub fn points(&self) -> &'a [GeoPoint] {
        self.points
    }

    /// Total path length in meters.
    pub fn total_distance(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at `fraction` of the path's length.
    ///
    /// Returns `None` only for an empty path. Fractions are clamped: `<= 0`
    /// yields the first point and `>= 1` the last. A path whose points all
    /// coincide yields its first point.
    pub fn point_at(&self, fraction: f64) -> Option<GeoPoint> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;

        if fraction <= 0.0 {
            return Some(first);
        }
        if fraction >= 1.0 {
            return Some(last);
        }

        Some(self.locate(fraction).map_or(last, |loc| loc.point))
    }

    /// Split the path into a covered prefix and an uncovered suffix at `fraction`.
    ///
    /// The split point ends the prefix and starts the suffix, so both halves
    /// render as continuous lines. `fraction <= 0` gives `(empty, full)` and
    /// `fraction >= 1` gives `(full, empty)`.
    pub fn split_at(&self, fraction: f64) -> (Vec<GeoPoint>, Vec<GeoPoint>) {
        if self.points.is_empty() {
            return (Vec::new(), Vec::new());
        }
        if fraction <= 0.0 {
            return (Vec::new(), self.points.to_vec());
        }
        if fraction >= 1.0 {
            return (self.points.to_vec(), Vec::new());
        }

        let Some(loc) = self.locate(fraction) else {
            if self.total_distance() > 0.0 {
                // Rounding pushed the target past the last vertex
                return (self.points.to_vec(), Vec::new());
            }
            // Zero-length path: nothing to cover, the single location is the boundary
            return (vec![self.points[0]], self.points.to_vec());
        };

        let mut covered = Vec::with_capacity(loc.vertex + 1);
        covered.extend_from_slice(&self.points[..loc.vertex]);
        covered.push(loc.point);

        // A split landing exactly on a vertex must not repeat that vertex
        let suffix_start = if loc.point == self.points[loc.vertex] {
            loc.vertex + 1
        } else {
            loc.vertex
        };
        let mut uncovered = Vec::with_capacity(self.points.len() - suffix_start + 1);
        uncovered.push(loc.point);
        uncovered.extend_from_slice(&self.points[suffix_start..]);

        (covered, uncovered)
    }

    /// Walk the cumulative distances to the segment containing the target.
    ///
    /// Expects `0 < fraction < 1`. Returns `None` when no segment with a
    /// non-zero length reaches the target (zero-length path or float rounding
    /// at the tail).
    fn locate(&self, fraction: f64) -> Option<SplitLocation> {
        let total = self.total_distance();
        if total <= 0.0 {
            return None;
        }

        let target = total * fraction;
        for i in 1..self.cumulative.len() {
            if self.cumulative[i] < target {
                continue;
            }

            let segment_length = self.cumulative[i] - self.cumulative[i - 1];
            if segment_length <= 0.0 {
                continue;
            }

            let t = (target - self.cumulative[i - 1]) / segment_length;
            let start = self.points[i - 1];
            let end = self.points[i];
            let point = if t >= 1.0 {
                end
            } else {
                GeoPoint::new(
                    start.latitude + (end.latitude - start.latitude) * t,
                    start.longitude + (end.longitude - start.longitude) * t,
                )
            };

            return Some(SplitLocation { vertex: i, point });
        }

        None
    }
}

/// Interpolate the point at `fraction` of a path's length.
///
/// Convenience wrapper for a single lookup; use [`PathProfile`] when resolving
/// many fractions on the same path.
///
/// ```rust
/// use roadie_route::{interpolate, GeoPoint};
///
/// let path = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)];
/// let mid = interpolate(&path, 0.5).unwrap();
/// assert!((mid.longitude - 1.0).abs() < 1e-9);
/// assert!(interpolate(&[], 0.5).is_none());
/// ```
pub fn interpolate(path: &[GeoPoint], fraction: f64) -> Option<GeoPoint> {
    PathProfile::new(path).point_at(fraction)
}

/// Split a path at `fraction` of its length into `(covered, uncovered)`.
///
/// ```rust
/// use roadie_route::{split_at_fraction, GeoPoint};
///
/// let path = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)];
/// let (covered, uncovered) = split_at_fraction(&path, 0.5);
/// assert_eq!(covered.len(), 2);
/// assert_eq!(uncovered.len(), 2);
/// assert_eq!(covered[1], uncovered[0]);
/// ```
pub fn split_at_fraction(path: &[GeoPoint], fraction: f64) -> (Vec<GeoPoint>, Vec<GeoPoint>) {
    PathProfile::new(path).split_at(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::haversine_distance;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn straight_path() -> Vec<GeoPoint> {
        vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)]
    }

    fn bent_path() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 3.0),
        ]
    }

    #[test]
    fn test_interpolate_empty_path() {
        assert!(interpolate(&[], 0.0).is_none());
        assert!(interpolate(&[], 0.5).is_none());
        assert!(interpolate(&[], 1.0).is_none());
    }

    #[test]
    fn test_interpolate_endpoints_are_clamped() {
        let path = bent_path();
        assert_eq!(interpolate(&path, 0.0), Some(path[0]));
        assert_eq!(interpolate(&path, -0.3), Some(path[0]));
        assert_eq!(interpolate(&path, 1.0), Some(path[4]));
        assert_eq!(interpolate(&path, 7.5), Some(path[4]));
    }

    #[test]
    fn test_interpolate_midpoint_of_straight_path() {
        let mid = interpolate(&straight_path(), 0.5).unwrap();
        assert!(approx_eq(mid.latitude, 0.0, 1e-12));
        assert!(approx_eq(mid.longitude, 1.0, 1e-9));
    }

    #[test]
    fn test_interpolate_single_point_path() {
        let only = GeoPoint::new(40.0, -100.0);
        assert_eq!(interpolate(&[only], 0.4), Some(only));
    }

    #[test]
    fn test_interpolate_zero_length_path() {
        let p = GeoPoint::new(40.0, -100.0);
        assert_eq!(interpolate(&[p, p, p], 0.5), Some(p));
    }

    #[test]
    fn test_interpolate_skips_duplicate_vertices() {
        let path = bent_path();
        let profile = PathProfile::new(&path);
        for i in 1..100 {
            let point = profile.point_at(i as f64 / 100.0).unwrap();
            assert!(point.latitude.is_finite() && point.longitude.is_finite());
        }
    }

    #[test]
    fn test_interpolated_point_lies_at_target_distance() {
        let path = bent_path();
        let profile = PathProfile::new(&path);
        let total = profile.total_distance();

        for fraction in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let (covered, _) = profile.split_at(fraction);
            let point = profile.point_at(fraction).unwrap();
            assert_eq!(covered.last(), Some(&point));

            // The prefix length approximates fraction * total (planar lerp on short segments)
            let walked = crate::geo_utils::path_length(&covered);
            assert!(approx_eq(walked / total, fraction, 0.01), "fraction {fraction}");
        }
    }

    #[test]
    fn test_split_straight_path_in_half() {
        let (covered, uncovered) = split_at_fraction(&straight_path(), 0.5);
        assert_eq!(covered.len(), 2);
        assert_eq!(uncovered.len(), 2);
        assert_eq!(covered[0], GeoPoint::new(0.0, 0.0));
        assert!(approx_eq(covered[1].longitude, 1.0, 1e-9));
        assert_eq!(covered[1], uncovered[0]);
        assert_eq!(uncovered[1], GeoPoint::new(0.0, 2.0));
    }

    #[test]
    fn test_split_bounds() {
        let path = bent_path();
        assert_eq!(split_at_fraction(&path, 0.0), (vec![], path.clone()));
        assert_eq!(split_at_fraction(&path, -1.0), (vec![], path.clone()));
        assert_eq!(split_at_fraction(&path, 1.0), (path.clone(), vec![]));
        assert_eq!(split_at_fraction(&path, 1.4), (path.clone(), vec![]));
        assert_eq!(split_at_fraction(&[], 0.5), (vec![], vec![]));
    }

    #[test]
    fn test_split_rejoins_to_original() {
        let path = bent_path();
        for fraction in [0.05, 0.2, 0.5, 0.8, 0.95] {
            let (covered, uncovered) = split_at_fraction(&path, fraction);
            assert_eq!(covered.last(), uncovered.first());

            let mut rejoined = covered.clone();
            rejoined.extend_from_slice(&uncovered[1..]);

            let original_length = crate::geo_utils::path_length(&path);
            let rejoined_length = crate::geo_utils::path_length(&rejoined);
            assert!(approx_eq(original_length, rejoined_length, 1.0));
            assert_eq!(rejoined.first(), path.first());
            assert_eq!(rejoined.last(), path.last());
        }
    }

    #[test]
    fn test_split_on_vertex_does_not_repeat_it() {
        // Two equal-length legs: halfway is exactly the middle vertex
        let path = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
        ];
        let (covered, uncovered) = split_at_fraction(&path, 0.5);
        assert_eq!(covered.last(), uncovered.first());
        assert!(uncovered.windows(2).all(|w| haversine_distance(&w[0], &w[1]) > 0.0));
    }

    #[test]
    fn test_split_zero_length_path() {
        let p = GeoPoint::new(10.0, 10.0);
        let (covered, uncovered) = split_at_fraction(&[p, p], 0.5);
        assert_eq!(covered, vec![p]);
        assert_eq!(uncovered, vec![p, p]);
    }
}
