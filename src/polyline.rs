//! Encoded polyline codec.
//!
//! Directions APIs return route geometry in the compact "encoded polyline"
//! format: every coordinate is a latitude/longitude delta from the previous
//! point, scaled by 1e5, zig-zag encoded and written as 5-bit groups offset
//! by 63 with `0x20` as the continuation bit.
//!
//! Encoding goes through the `polyline` crate. Decoding is hand-rolled and
//! strict: a string that ends in the middle of a value, or whose running
//! coordinates overflow, is rejected rather than silently truncated, because
//! a well-formed route never produces one.

use geo::Coord;

use crate::error::{Result, RoadieError};
use crate::GeoPoint;

const PRECISION: f64 = 1e5;
const PRECISION_DIGITS: u32 = 5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
// Beyond this shift the accumulated value no longer fits an i64
const MAX_SHIFT: u32 = 60;

/// Decode an encoded polyline into an ordered path.
///
/// An empty string decodes to an empty path.
///
/// # Errors
///
/// Returns [`RoadieError::MalformedPolyline`] when the string ends mid-value,
/// a latitude has no matching longitude, a byte lies outside `'?'..='~'`, or
/// a value or running coordinate is too large to represent.
///
/// # Example
///
/// ```rust
/// use roadie_route::polyline;
///
/// let path = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(path.len(), 3);
/// assert!((path[0].latitude - 38.5).abs() < 1e-9);
/// assert!((path[2].longitude - (-126.453)).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let start = index;
        lat = lat
            .checked_add(decode_value(bytes, &mut index, "latitude")?)
            .ok_or_else(|| RoadieError::malformed(start, "latitude overflows"))?;

        let start = index;
        lng = lng
            .checked_add(decode_value(bytes, &mut index, "longitude")?)
            .ok_or_else(|| RoadieError::malformed(start, "longitude overflows"))?;

        points.push(GeoPoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    log::debug!(
        "[Polyline] Decoded {} points from {} bytes",
        points.len(),
        bytes.len()
    );
    Ok(points)
}

/// Encode a path as a polyline string.
///
/// Coordinates are rounded to 1e-5 degrees, so `decode(encode(path))`
/// reproduces the input to within that precision.
///
/// # Errors
///
/// Returns [`RoadieError::InvalidCoordinate`] when a point lies outside
/// the valid latitude/longitude range.
///
/// ```rust
/// use roadie_route::{polyline, GeoPoint};
///
/// let path = vec![
///     GeoPoint::new(38.5, -120.2),
///     GeoPoint::new(40.7, -120.95),
///     GeoPoint::new(43.252, -126.453),
/// ];
/// assert_eq!(polyline::encode(&path).unwrap(), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
pub fn encode(points: &[GeoPoint]) -> Result<String> {
    let coords = points.iter().map(|p| Coord {
        x: p.longitude,
        y: p.latitude,
    });

    ::polyline::encode_coordinates(coords, PRECISION_DIGITS).map_err(|e| {
        RoadieError::InvalidCoordinate {
            reason: e.to_string(),
        }
    })
}

/// Read one zig-zag encoded value starting at `index`, advancing past it.
fn decode_value(bytes: &[u8], index: &mut usize, axis: &str) -> Result<i64> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| RoadieError::malformed(*index, format!("{axis} delta is truncated")))?;

        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(RoadieError::malformed(
                *index,
                format!("byte {byte:#04x} is outside the polyline alphabet"),
            ));
        }
        if shift > MAX_SHIFT {
            return Err(RoadieError::malformed(
                *index,
                format!("{axis} delta is too long"),
            ));
        }

        let chunk = i64::from(byte - CHAR_OFFSET);
        *index += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
