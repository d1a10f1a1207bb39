//! Unified error handling for the route overlay library.
//!
//! Three conditions are surfaced to callers: a polyline that cannot be
//! decoded, a point that cannot be encoded, and a route duration that cannot
//! be divided by. Empty paths and
//! zero-length segments are not errors; the geometry functions return
//! well-defined fallbacks for them.

use thiserror::Error;

/// Unified error type for route overlay operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum RoadieError {
    /// Encoded polyline is truncated or contains bytes outside the encoding alphabet
    #[error("Malformed polyline at byte {index}: {reason}")]
    MalformedPolyline { index: usize, reason: String },

    /// Point lies outside the valid latitude/longitude range and cannot be encoded
    #[error("Invalid coordinate: {reason}")]
    InvalidCoordinate { reason: String },

    /// Route duration is zero, negative, or not a finite number
    #[error("Invalid route duration: {value} seconds")]
    InvalidDuration { value: f64 },
}

impl RoadieError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        RoadieError::MalformedPolyline {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type alias for route overlay operations.
pub type Result<T> = std::result::Result<T, RoadieError>;

/// Reject route durations that would make fractions meaningless.
pub(crate) fn check_route_duration(route_duration_seconds: f64) -> Result<f64> {
    if route_duration_seconds.is_finite() && route_duration_seconds > 0.0 {
        Ok(route_duration_seconds)
    } else {
        Err(RoadieError::InvalidDuration {
            value: route_duration_seconds,
        })
    }
}
