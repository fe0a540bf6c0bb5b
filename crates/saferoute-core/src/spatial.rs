//! Geometry kernel: great-circle distance and local planar projections.
//!
//! The planar helpers use an equirectangular approximation anchored at an
//! origin point, with longitude scaled by the cosine of the origin latitude.
//! Error grows with distance from the origin, so results are only trustworthy
//! for corridors up to a few tens of kilometers. That covers city and
//! regional routing, which is the intended use.

use crate::models::{Point, Zone};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (Haversine formula).
pub fn haversine_distance(a: Point, b: Point) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Project a point into the local tangent plane anchored at `origin`.
/// Returns (x, y) offsets in meters, x pointing east and y pointing north.
pub fn to_local_xy(origin: Point, p: Point) -> (f64, f64) {
    let x = (p.lng - origin.lng).to_radians() * EARTH_RADIUS_M * origin.lat.to_radians().cos();
    let y = (p.lat - origin.lat).to_radians() * EARTH_RADIUS_M;
    (x, y)
}

/// Inverse of [`to_local_xy`]: convert local plane offsets back to degrees.
pub fn from_local_xy(origin: Point, x: f64, y: f64) -> Point {
    let lat = origin.lat + (y / EARTH_RADIUS_M).to_degrees();
    let lng = origin.lng + (x / (EARTH_RADIUS_M * origin.lat.to_radians().cos())).to_degrees();
    Point::new(lat, lng)
}

/// Minimum distance in meters from point `p` to the segment `a -> b`,
/// computed in the local plane anchored at `a`. The projection parameter is
/// clamped to [0, 1], so endpoints are handled correctly.
pub fn point_to_segment_distance_m(a: Point, b: Point, p: Point) -> f64 {
    let (bx, by) = to_local_xy(a, b);
    let (px, py) = to_local_xy(a, p);
    let len_sq = bx * bx + by * by;
    if len_sq == 0.0 {
        return (px * px + py * py).sqrt();
    }
    let t = ((px * bx + py * by) / len_sq).clamp(0.0, 1.0);
    let dx = px - t * bx;
    let dy = py - t * by;
    (dx * dx + dy * dy).sqrt()
}

/// Clamped projection parameter of `p` along the chord `a -> b`:
/// 0 at `a`, 1 at `b`.
pub fn chord_position(a: Point, b: Point, p: Point) -> f64 {
    let (bx, by) = to_local_xy(a, b);
    let (px, py) = to_local_xy(a, p);
    let len_sq = bx * bx + by * by;
    if len_sq == 0.0 {
        return 0.0;
    }
    ((px * bx + py * by) / len_sq).clamp(0.0, 1.0)
}

/// Does the segment `a -> b` pass through or touch the zone's circle?
pub fn segment_crosses_zone(a: Point, b: Point, zone: &Zone) -> bool {
    point_to_segment_distance_m(a, b, zone.center()) <= zone.radius_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // ~111km for 1 degree of latitude
        let dist = haversine_distance(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn haversine_same_point() {
        let p = Point::new(11.7488, 79.7479);
        assert!(haversine_distance(p, p) < 0.001);
    }

    #[test]
    fn local_plane_roundtrip() {
        let origin = Point::new(11.74, 79.74);
        let p = Point::new(11.7532, 79.7611);
        let (x, y) = to_local_xy(origin, p);
        let back = from_local_xy(origin, x, y);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lng - p.lng).abs() < 1e-9);
    }

    #[test]
    fn local_plane_matches_haversine_at_city_scale() {
        let origin = Point::new(11.74, 79.74);
        let p = Point::new(11.76, 79.77);
        let (x, y) = to_local_xy(origin, p);
        let planar = (x * x + y * y).sqrt();
        let sphere = haversine_distance(origin, p);
        assert!((planar - sphere).abs() / sphere < 0.001);
    }

    #[test]
    fn point_to_segment_perpendicular() {
        let a = Point::new(11.74, 79.74);
        let b = Point::new(11.74, 79.76);
        // Point due north of the segment midpoint.
        let p = Point::new(11.75, 79.75);
        let dist = point_to_segment_distance_m(a, b, p);
        let expected = haversine_distance(Point::new(11.74, 79.75), p);
        assert!((dist - expected).abs() < 5.0, "got {dist}, expected ~{expected}");
    }

    #[test]
    fn point_to_segment_clamps_to_endpoint() {
        let a = Point::new(11.74, 79.74);
        let b = Point::new(11.74, 79.75);
        // Point past b along the segment direction.
        let p = Point::new(11.74, 79.77);
        let dist = point_to_segment_distance_m(a, b, p);
        let expected = haversine_distance(b, p);
        assert!((dist - expected).abs() < 5.0);
    }

    #[test]
    fn point_to_segment_degenerate_segment() {
        let a = Point::new(11.74, 79.74);
        let p = Point::new(11.75, 79.74);
        let dist = point_to_segment_distance_m(a, a, p);
        assert!((dist - haversine_distance(a, p)).abs() < 5.0);
    }

    #[test]
    fn segment_crosses_zone_hit_and_miss() {
        let zone = Zone {
            name: "Z".to_string(),
            lat: 11.75,
            lng: 79.75,
            radius_m: 500.0,
            risk: 80.0,
            level: None,
        };
        // Passes right through the center.
        let a = Point::new(11.75, 79.74);
        let b = Point::new(11.75, 79.76);
        assert!(segment_crosses_zone(a, b, &zone));
        // Parallel segment ~2.2km north.
        let a2 = Point::new(11.77, 79.74);
        let b2 = Point::new(11.77, 79.76);
        assert!(!segment_crosses_zone(a2, b2, &zone));
    }
}
