//! Decoder for the encoded-polyline format used by routing providers.
//!
//! Route geometry arrives as an ASCII string where each coordinate delta is
//! zigzag-encoded into 5-bit chunks offset by 63. Decoding accumulates the
//! deltas into absolute (latitude, longitude) points at 1e-5 degree
//! precision.

use crate::domain::{Coordinates, InvalidCoordinates};

/// Error returned when decoding an invalid polyline string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// A byte outside the valid encoding alphabet.
    #[error("invalid polyline character at byte {0}")]
    InvalidChar(usize),

    /// The string ended in the middle of a coordinate value.
    #[error("truncated polyline")]
    Truncated,

    /// A coordinate value ran over the representable range.
    #[error("coordinate value overflow")]
    Overflow,

    /// Decoded values fell outside valid latitude/longitude ranges.
    #[error("decoded point out of range: {0}")]
    OutOfRange(#[from] InvalidCoordinates),
}

/// Decode an encoded polyline into its sequence of points.
///
/// # Examples
///
/// ```
/// use facility_server::routing::polyline;
///
/// let path = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0].lat(), 38.5);
/// assert_eq!(path[0].lng(), -120.2);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinates>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat += decode_value(bytes, &mut pos)?;
        lng += decode_value(bytes, &mut pos)?;

        points.push(Coordinates::new(lat as f64 / 1e5, lng as f64 / 1e5)?);
    }

    Ok(points)
}

/// Decode one zigzag-encoded value starting at `pos`, advancing it.
fn decode_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*pos).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidChar(*pos));
        }
        *pos += 1;

        if shift > 58 {
            return Err(PolylineError::Overflow);
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // Undo the zigzag: the low bit carries the sign
    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
