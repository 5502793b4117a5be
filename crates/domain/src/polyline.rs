//! Polyline codec
//!
//! Google's polyline algorithm at the usual 1e-5 precision: coordinates are
//! scaled, delta-encoded against the previous point, zig-zag encoded, and
//! emitted as little-endian 5-bit groups offset into printable ASCII with
//! 0x20 marking continuation. Both directions are pure functions; no state
//! survives a call.

use crate::value_objects::GeoPoint;
use thiserror::Error;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CHUNK_MAX: u8 = 126;
const CONTINUATION_BIT: u8 = 0x20;
const CHUNK_BITS: u32 = 5;
// Values are bounded by +-180 * 1e5 zig-zagged; anything needing more
// chunks than this is garbage input, not a coordinate.
const MAX_SHIFT: u32 = 35;

/// Errors from [`decode`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolylineError {
    /// Byte outside the printable encoding alphabet
    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter {
        /// The offending character
        character: char,
        /// Byte offset into the encoded string
        position: usize,
    },

    /// String ended while a value's continuation bit was still set
    #[error("polyline truncated mid-value at byte {position}")]
    Truncated {
        /// Byte offset where input ran out
        position: usize,
    },

    /// A single value ran past any plausible coordinate magnitude
    #[error("polyline value overflow at byte {position}")]
    Overflow {
        /// Byte offset of the chunk that overflowed
        position: usize,
    },

    /// Decoded pair is not a valid latitude/longitude
    #[error("decoded coordinate out of range: ({latitude}, {longitude})")]
    OutOfRange {
        /// Accumulated latitude in degrees
        latitude: f64,
        /// Accumulated longitude in degrees
        longitude: f64,
    },
}

/// Decode a polyline into coordinates.
///
/// An empty string decodes to an empty sequence. Malformed input returns an
/// error, never panics.
///
/// # Errors
///
/// See [`PolylineError`].
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut position = 0;
    let mut lat_e5: i64 = 0;
    let mut lon_e5: i64 = 0;

    while position < bytes.len() {
        let (lat_delta, after_lat) = decode_value(bytes, position)?;
        let (lon_delta, after_lon) = decode_value(bytes, after_lat)?;
        position = after_lon;

        lat_e5 += lat_delta;
        lon_e5 += lon_delta;

        let latitude = unscale(lat_e5);
        let longitude = unscale(lon_e5);
        let point = GeoPoint::new(latitude, longitude).map_err(|_| PolylineError::OutOfRange {
            latitude,
            longitude,
        })?;
        points.push(point);
    }

    Ok(points)
}

/// Encode coordinates into a polyline.
///
/// Inverse of [`decode`] up to the 1e-5 scaling grid: decoding the result
/// reproduces every coordinate to within 1e-5 per axis.
#[must_use]
pub fn encode(points: &[GeoPoint]) -> String {
    // ~6 bytes per point is typical for city-scale deltas
    let mut encoded = String::with_capacity(points.len() * 6);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = scale(point.latitude());
        let lon = scale(point.longitude());
        encode_value(lat - prev_lat, &mut encoded);
        encode_value(lon - prev_lon, &mut encoded);
        prev_lat = lat;
        prev_lon = lon;
    }

    encoded
}

fn decode_value(bytes: &[u8], start: usize) -> Result<(i64, usize), PolylineError> {
    let mut accumulated: i64 = 0;
    let mut shift: u32 = 0;
    let mut position = start;

    loop {
        let byte = *bytes
            .get(position)
            .ok_or(PolylineError::Truncated { position })?;
        if !(CHUNK_OFFSET..=CHUNK_MAX).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: char::from(byte),
                position,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position });
        }

        let chunk = byte - CHUNK_OFFSET;
        accumulated |= i64::from(chunk & !CONTINUATION_BIT) << shift;
        position += 1;

        if chunk & CONTINUATION_BIT == 0 {
            return Ok((zigzag_decode(accumulated), position));
        }
        shift += CHUNK_BITS;
    }
}

fn encode_value(value: i64, out: &mut String) {
    let mut remaining = zigzag_encode(value);
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let mut chunk = (remaining & 0x1f) as u8;
        remaining >>= CHUNK_BITS;
        if remaining > 0 {
            chunk |= CONTINUATION_BIT;
        }
        out.push(char::from(chunk + CHUNK_OFFSET));
        if remaining == 0 {
            break;
        }
    }
}

const fn zigzag_decode(value: i64) -> i64 {
    if value & 1 == 1 {
        !(value >> 1)
    } else {
        value >> 1
    }
}

#[allow(clippy::cast_sign_loss)]
const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[allow(clippy::cast_possible_truncation)]
fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

#[allow(clippy::cast_precision_loss)]
fn unscale(scaled: i64) -> f64 {
    scaled as f64 / PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;

    // The worked example from Google's algorithm documentation
    const DOCUMENTED_EXAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn documented_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new_unchecked(38.5, -120.2),
            GeoPoint::new_unchecked(40.7, -120.95),
            GeoPoint::new_unchecked(43.252, -126.453),
        ]
    }

    fn assert_points_close(actual: &[GeoPoint], expected: &[GeoPoint]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.latitude() - e.latitude()).abs() < 1e-5,
                "latitude {} vs {}",
                a.latitude(),
                e.latitude()
            );
            assert!(
                (a.longitude() - e.longitude()).abs() < 1e-5,
                "longitude {} vs {}",
                a.longitude(),
                e.longitude()
            );
        }
    }

    #[test]
    fn decode_documented_example() {
        let points = decode(DOCUMENTED_EXAMPLE).expect("valid polyline");
        assert_points_close(&points, &documented_points());
    }

    #[test]
    fn encode_documented_example() {
        assert_eq!(encode(&documented_points()), DOCUMENTED_EXAMPLE);
    }

    #[test]
    fn empty_string_decodes_to_empty_sequence() {
        assert_eq!(decode("").expect("empty is fine"), vec![]);
    }

    #[test]
    fn empty_sequence_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn single_origin_point() {
        let origin = vec![GeoPoint::new_unchecked(0.0, 0.0)];
        let encoded = encode(&origin);
        assert_eq!(encoded, "??");
        assert_points_close(&decode(&encoded).expect("valid"), &origin);
    }

    #[test]
    fn round_trip_city_path() {
        let path = vec![
            GeoPoint::new_unchecked(10.7769, 106.7009),
            GeoPoint::new_unchecked(10.7765, 106.7021),
            GeoPoint::new_unchecked(10.7801, 106.6998),
            GeoPoint::new_unchecked(10.7622, 106.6602),
        ];
        let decoded = decode(&encode(&path)).expect("valid");
        assert_points_close(&decoded, &path);
    }

    #[test]
    fn round_trip_negative_hemisphere() {
        let path = vec![
            GeoPoint::new_unchecked(-33.8688, 151.2093),
            GeoPoint::new_unchecked(-33.8675, 151.207),
        ];
        let decoded = decode(&encode(&path)).expect("valid");
        assert_points_close(&decoded, &path);
    }

    #[test]
    fn truncated_value_is_an_error() {
        // "_p~iF" is a complete latitude with no longitude after it
        assert!(matches!(
            decode("_p~iF"),
            Err(PolylineError::Truncated { .. })
        ));
        // continuation bit set on the final byte
        assert!(matches!(
            decode("_p~iF~"),
            Err(PolylineError::Truncated { .. })
        ));
    }

    #[test]
    fn invalid_character_is_an_error() {
        let err = decode("_p~iF ").expect_err("space is outside the alphabet");
        assert_eq!(
            err,
            PolylineError::InvalidCharacter {
                character: ' ',
                position: 5
            }
        );
    }

    #[test]
    fn accumulated_point_out_of_range_is_an_error() {
        // Each pair moves +60 degrees latitude; the second accumulates to 120
        let single = encode(&[GeoPoint::new_unchecked(60.0, 0.0)]);
        let runaway = format!("{single}{single}{single}");
        assert!(matches!(
            decode(&runaway),
            Err(PolylineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn overflow_guard_trips_on_endless_continuation() {
        // '~' keeps the continuation bit set; 16 of them never terminate a
        // sane coordinate value
        let junk = "~".repeat(16);
        assert!(matches!(
            decode(&junk),
            Err(PolylineError::Overflow { .. })
        ));
    }

    #[test]
    fn decode_is_stateless_across_calls() {
        let first = decode(DOCUMENTED_EXAMPLE).expect("valid");
        let second = decode(DOCUMENTED_EXAMPLE).expect("valid");
        assert_eq!(first, second);
    }
}
