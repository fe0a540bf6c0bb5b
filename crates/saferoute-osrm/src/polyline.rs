//! Encoded-polyline codec at precision 6.
//!
//! The format OSRM emits for `geometries=polyline6`: each coordinate is a
//! delta from the previous one, zigzag-signed and packed into base-64-ish
//! chunks of 5 bits offset by 63.

use saferoute_core::Point;

const PRECISION: f64 = 1e6;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("polyline ended mid-value")]
    Truncated,
    #[error("invalid polyline byte {0:#x}")]
    InvalidByte(u8),
}

/// Decode a polyline6 string into coordinates.
pub fn decode(encoded: &str) -> Result<Vec<Point>, PolylineError> {
    let mut bytes = encoded.bytes();
    let mut points = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;
    while let Some(dlat) = next_delta(&mut bytes)? {
        let dlng = next_delta(&mut bytes)?.ok_or(PolylineError::Truncated)?;
        lat += dlat;
        lng += dlng;
        points.push(Point::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }
    Ok(points)
}

/// Encode coordinates as polyline6.
pub fn encode(points: &[Point]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;
    for p in points {
        let lat = (p.lat * PRECISION).round() as i64;
        let lng = (p.lng * PRECISION).round() as i64;
        write_delta(&mut out, lat - prev_lat);
        write_delta(&mut out, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn next_delta(bytes: &mut impl Iterator<Item = u8>) -> Result<Option<i64>, PolylineError> {
    let mut shift = 0u32;
    let mut value = 0i64;
    let mut started = false;
    loop {
        let Some(b) = bytes.next() else {
            return if started {
                Err(PolylineError::Truncated)
            } else {
                Ok(None)
            };
        };
        if b < 63 {
            return Err(PolylineError::InvalidByte(b));
        }
        started = true;
        let chunk = (b - 63) as i64;
        value |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk & 0x20 == 0 {
            let delta = if value & 1 != 0 {
                !(value >> 1)
            } else {
                value >> 1
            };
            return Ok(Some(delta));
        }
        // A real coordinate delta never needs this many chunks.
        if shift > 60 {
            return Err(PolylineError::Truncated);
        }
    }
}

fn write_delta(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 } as u64;
    loop {
        let mut chunk = (value & 0x1f) as u8;
        value >>= 5;
        if value != 0 {
            chunk |= 0x20;
        }
        out.push((chunk + 63) as char);
        if value == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_decodes_to_no_points() {
        assert_eq!(decode("").unwrap(), Vec::new());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let points = vec![
            Point::new(11.7488, 79.7479),
            Point::new(11.7532, 79.7611),
            Point::new(-33.8675, 151.207),
        ];
        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), points.len());
        for (d, p) in decoded.iter().zip(&points) {
            assert!((d.lat - p.lat).abs() < 1e-6);
            assert!((d.lng - p.lng).abs() < 1e-6);
        }
    }

    #[test]
    fn negative_deltas_survive() {
        let points = vec![Point::new(1.0, 1.0), Point::new(0.5, 0.25)];
        let decoded = decode(&encode(&points)).unwrap();
        assert!((decoded[1].lat - 0.5).abs() < 1e-6);
        assert!((decoded[1].lng - 0.25).abs() < 1e-6);
    }

    #[test]
    fn truncated_input_is_an_error() {
        let mut encoded = encode(&[Point::new(11.7488, 79.7479)]);
        encoded.pop();
        assert_eq!(decode(&encoded), Err(PolylineError::Truncated));
    }

    #[test]
    fn odd_value_count_is_an_error() {
        // A longitude with no latitude partner.
        let lat_only = {
            let mut out = String::new();
            super::write_delta(&mut out, 11_748_800);
            out
        };
        assert_eq!(decode(&lat_only), Err(PolylineError::Truncated));
    }

    #[test]
    fn control_characters_are_rejected() {
        assert_eq!(decode("\u{1}"), Err(PolylineError::InvalidByte(1)));
    }
}
