//! Zoom-dependent clustering of track markers.
//!
//! At low zoom a long playlist would stack dozens of album-art markers on top
//! of each other. Tracks that start within one time bucket of a cluster's
//! head are folded into that cluster; the bucket is wider the further the map
//! is zoomed out. The first and last track always head their own cluster so
//! the start and end of the music stay visible at every zoom level.
//!
//! Also provides [`MarkerIndex`], an R-tree over resolved marker coordinates
//! used to find the track under a map tap.

use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::geo_utils::{compute_center, haversine_distance};
use crate::positions::TrackPosition;
use crate::GeoPoint;

const MINUTE_MS: u64 = 60 * 1000;

/// Bucket width used below a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ZoomBand {
    /// Band applies to zoom levels strictly below this value
    pub below_zoom: u32,
    /// Tracks starting within this many milliseconds of a cluster head join it
    pub bucket_ms: u64,
}

/// Configuration for marker clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ClusterConfig {
    /// At or above this zoom every track gets its own marker (default: 10)
    pub singleton_min_zoom: u32,
    /// Bands ordered by ascending `below_zoom`; the first matching band wins
    pub bands: Vec<ZoomBand>,
    /// Markers are drawn dimmed below this zoom (default: 9)
    pub dim_below_zoom: u32,
    /// Opacity of dimmed markers (default: 0.6)
    pub dimmed_opacity: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            singleton_min_zoom: 10,
            bands: vec![
                ZoomBand {
                    below_zoom: 5,
                    bucket_ms: 60 * MINUTE_MS,
                },
                ZoomBand {
                    below_zoom: 8,
                    bucket_ms: 15 * MINUTE_MS,
                },
                ZoomBand {
                    below_zoom: 10,
                    bucket_ms: 5 * MINUTE_MS,
                },
            ],
            dim_below_zoom: 9,
            dimmed_opacity: 0.6,
        }
    }
}

impl ClusterConfig {
    /// Bucket width for a zoom level, or `None` when no grouping applies.
    ///
    /// A zoom below `singleton_min_zoom` that no band covers uses the last
    /// (finest) band.
    pub fn bucket_width_ms(&self, zoom: u32) -> Option<u64> {
        if zoom >= self.singleton_min_zoom {
            return None;
        }
        self.bands
            .iter()
            .find(|band| zoom < band.below_zoom)
            .or_else(|| self.bands.last())
            .map(|band| band.bucket_ms)
    }

    /// Marker opacity at a zoom level.
    pub fn marker_opacity(&self, zoom: u32) -> f32 {
        if zoom < self.dim_below_zoom {
            self.dimmed_opacity
        } else {
            1.0
        }
    }
}

/// A group of track markers drawn as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackCluster {
    /// The track whose marker represents the cluster
    pub head: TrackPosition,
    /// All tracks in the cluster, head first
    pub members: Vec<TrackPosition>,
}

impl TrackCluster {
    fn new(head: TrackPosition) -> Self {
        Self {
            members: vec![head.clone()],
            head,
        }
    }

    /// Number of tracks represented by this marker.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a cluster holds at least its head.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group positions into marker clusters for a zoom level.
///
/// Positions must be in playback order. Each position either joins the most
/// recent cluster (its start time is less than one bucket after the head's)
/// or starts a new one. The last position always starts a new cluster.
///
/// ```rust
/// use roadie_route::{cluster_positions, compute_positions, ClusterConfig, TrackTiming};
///
/// let tracks: Vec<TrackTiming> = (0..20)
///     .map(|i| TrackTiming::new(format!("track-{i}"), 180_000))
///     .collect();
/// let positions = compute_positions(&tracks, 3_600.0);
/// let config = ClusterConfig::default();
///
/// assert_eq!(cluster_positions(&positions, 12, &config).len(), 20);
/// assert!(cluster_positions(&positions, 3, &config).len() < 20);
/// ```
pub fn cluster_positions(
    positions: &[TrackPosition],
    zoom: u32,
    config: &ClusterConfig,
) -> Vec<TrackCluster> {
    let Some(bucket_ms) = config.bucket_width_ms(zoom) else {
        return positions.iter().cloned().map(TrackCluster::new).collect();
    };

    let last_index = positions.len().saturating_sub(1);
    let mut clusters: Vec<TrackCluster> = Vec::new();

    for (i, pos) in positions.iter().enumerate() {
        let joins_current = i != last_index
            && clusters.last().is_some_and(|cluster| {
                pos.cumulative_time_ms
                    .saturating_sub(cluster.head.cumulative_time_ms)
                    < bucket_ms
            });

        if joins_current {
            if let Some(cluster) = clusters.last_mut() {
                cluster.members.push(pos.clone());
            }
            continue;
        }
        clusters.push(TrackCluster::new(pos.clone()));
    }

    debug!(
        "[Clustering] zoom {}: {} positions -> {} clusters ({} ms buckets)",
        zoom,
        positions.len(),
        clusters.len(),
        bucket_ms
    );
    clusters
}

// ============================================================================
// Marker lookup
// ============================================================================

/// Marker coordinate in the index: longitude pre-scaled by cos(latitude) so
/// that planar distances approximate ground distances near the route.
#[derive(Debug, Clone)]
struct MarkerEntry {
    index: usize,
    coords: [f64; 2],
}

impl RTreeObject for MarkerEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for MarkerEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the resolved coordinates of track positions.
pub struct MarkerIndex<'a> {
    positions: &'a [TrackPosition],
    tree: RTree<MarkerEntry>,
    lng_scale: f64,
}

impl<'a> MarkerIndex<'a> {
    /// Index every position that has a valid coordinate.
    pub fn new(positions: &'a [TrackPosition]) -> Self {
        let resolved: Vec<GeoPoint> = positions.iter().filter_map(marker_point).collect();
        let lng_scale = compute_center(&resolved).latitude.to_radians().cos().max(0.1);

        let entries: Vec<MarkerEntry> = positions
            .iter()
            .enumerate()
            .filter_map(|(index, pos)| {
                marker_point(pos).map(|p| MarkerEntry {
                    index,
                    coords: [p.longitude * lng_scale, p.latitude],
                })
            })
            .collect();

        if entries.len() < positions.len() {
            debug!(
                "[Clustering] Indexed {} of {} markers",
                entries.len(),
                positions.len()
            );
        }

        Self {
            positions,
            tree: RTree::bulk_load(entries),
            lng_scale,
        }
    }

    /// Track marker closest to `tap`, if it lies within `max_distance_meters`.
    pub fn nearest(&self, tap: &GeoPoint, max_distance_meters: f64) -> Option<&'a TrackPosition> {
        let query = [tap.longitude * self.lng_scale, tap.latitude];
        let entry = self.tree.nearest_neighbor(&query)?;
        let candidate = &self.positions[entry.index];
        let point = candidate.position?;

        (haversine_distance(&point, tap) <= max_distance_meters).then_some(candidate)
    }
}

/// Coordinate a marker is drawn at; NaN or out-of-range points are never drawn.
fn marker_point(pos: &TrackPosition) -> Option<GeoPoint> {
    pos.position.filter(GeoPoint::is_valid)
}

/// Find the track marker under a map tap.
///
/// Convenience wrapper that builds a throwaway [`MarkerIndex`]; keep an index
/// around when handling many taps on the same positions.
pub fn find_nearest_position<'a>(
    positions: &'a [TrackPosition],
    tap: &GeoPoint,
    max_distance_meters: f64,
) -> Option<&'a TrackPosition> {
    MarkerIndex::new(positions).nearest(tap, max_distance_meters)
}
