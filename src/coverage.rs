//! Playlist coverage of a route.
//!
//! Coverage is the share of the route's driving time that the playlist fills.
//! Below 1.0 the route is drawn in two colors: the covered prefix up to the
//! point where the music stops, and the uncovered remainder. The caller is
//! told where the playlist ends and how many minutes of driving are left.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check_route_duration, Result};
use crate::format::format_playback_time;
use crate::interpolation::PathProfile;
use crate::GeoPoint;

/// Split of a route into the part the playlist covers and the part it doesn't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct CoverageResult {
    /// Route from departure to where the playlist ends
    pub covered_path: Vec<GeoPoint>,
    /// Rest of the route; empty when the playlist lasts the whole drive
    pub uncovered_path: Vec<GeoPoint>,
    /// Playlist duration divided by route duration (not clamped)
    pub coverage_fraction: f64,
    /// Where the playlist runs out, `None` when it covers the whole route
    pub end_point: Option<GeoPoint>,
    /// Driving time left after the last track, rounded up to whole minutes
    pub gap_minutes: u32,
}

impl CoverageResult {
    /// True when the playlist lasts at least as long as the drive.
    pub fn is_complete(&self) -> bool {
        self.coverage_fraction >= 1.0
    }

    /// Coverage as a rounded percentage, e.g. `63` for 0.633.
    ///
    /// Not capped at 100: a playlist twice as long as the drive reports 200.
    pub fn percent(&self) -> u32 {
        (self.coverage_fraction.max(0.0) * 100.0).round() as u32
    }

    /// Human-readable summary for the end-of-playlist marker.
    pub fn summary(&self) -> String {
        if self.is_complete() {
            return format!("Playlist covers the whole trip ({}%)", self.percent());
        }
        let unit = if self.gap_minutes == 1 { "minute" } else { "minutes" };
        format!(
            "{} {} of trip remaining (coverage {}%)",
            self.gap_minutes,
            unit,
            self.percent()
        )
    }
}

/// Playlist duration as a fraction of the route duration.
///
/// No clamping: values above 1.0 mean the playlist outlasts the drive.
///
/// ```rust
/// use roadie_route::coverage_fraction;
///
/// assert_eq!(coverage_fraction(300_000, 600.0), 0.5);
/// assert_eq!(coverage_fraction(900_000, 600.0), 1.5);
/// ```
pub fn coverage_fraction(playlist_duration_ms: u64, route_duration_seconds: f64) -> f64 {
    playlist_duration_ms as f64 / (route_duration_seconds * 1000.0)
}

/// Whole minutes of driving left once the playlist ends (rounded up).
///
/// Zero when the playlist covers the route.
pub fn gap_minutes(route_duration_seconds: f64, fraction: f64) -> u32 {
    if fraction >= 1.0 {
        return 0;
    }
    let gap_seconds = route_duration_seconds * (1.0 - fraction.max(0.0));
    (gap_seconds / 60.0).ceil().max(0.0) as u32
}

/// Build the full coverage overlay for a decoded route.
///
/// # Errors
///
/// Returns [`crate::RoadieError::InvalidDuration`] when the route duration is
/// not a positive, finite number of seconds.
pub fn compute_coverage(
    path: &[GeoPoint],
    playlist_duration_ms: u64,
    route_duration_seconds: f64,
) -> Result<CoverageResult> {
    let route_duration_seconds = check_route_duration(route_duration_seconds)?;
    let fraction = coverage_fraction(playlist_duration_ms, route_duration_seconds);

    let result = if fraction < 1.0 {
        let (covered_path, uncovered_path) = PathProfile::new(path).split_at(fraction);
        let end_point = covered_path.last().copied();
        CoverageResult {
            covered_path,
            uncovered_path,
            coverage_fraction: fraction,
            end_point,
            gap_minutes: gap_minutes(route_duration_seconds, fraction),
        }
    } else {
        CoverageResult {
            covered_path: path.to_vec(),
            uncovered_path: Vec::new(),
            coverage_fraction: fraction,
            end_point: None,
            gap_minutes: 0,
        }
    };

    debug!(
        "[Coverage] {} of {} s route covered ({}), {} min gap",
        format_playback_time(playlist_duration_ms),
        route_duration_seconds,
        result.percent(),
        result.gap_minutes
    );
    Ok(result)
}
