//! Zone intersection tests over route polylines.

use crate::models::{Point, Zone};
use crate::spatial::segment_crosses_zone;

/// True if any consecutive segment of `route` crosses any zone.
/// Short-circuits on the first hit.
pub fn route_crosses_zones(route: &[Point], zones: &[Zone]) -> bool {
    route
        .windows(2)
        .any(|seg| zones.iter().any(|z| segment_crosses_zone(seg[0], seg[1], z)))
}

/// Every zone whose circle the single segment `a -> b` crosses.
///
/// Returns the full matching set (no short-circuit); the planner uses it to
/// decide which zones a detour must bypass.
pub fn zones_crossing_segment(a: Point, b: Point, zones: &[Zone]) -> Vec<Zone> {
    zones
        .iter()
        .filter(|z| segment_crosses_zone(a, b, z))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::haversine_distance;

    fn zone(lat: f64, lng: f64, radius_m: f64) -> Zone {
        Zone {
            name: String::new(),
            lat,
            lng,
            radius_m,
            risk: 80.0,
            level: None,
        }
    }

    #[test]
    fn vertex_inside_zone_is_detected() {
        let z = zone(11.75, 79.75, 500.0);
        // Second vertex sits ~300m from the center, inside the radius.
        let inside = Point::new(11.75 + 300.0 / 111_194.0, 79.75);
        assert!(haversine_distance(inside, z.center()) <= z.radius_m);
        let route = vec![Point::new(11.70, 79.70), inside, Point::new(11.80, 79.80)];
        assert!(route_crosses_zones(&route, &[z]));
    }

    #[test]
    fn clear_route_is_not_flagged() {
        let z = zone(11.75, 79.75, 500.0);
        let route = vec![
            Point::new(11.80, 79.70),
            Point::new(11.80, 79.75),
            Point::new(11.80, 79.80),
        ];
        assert!(!route_crosses_zones(&route, &[z]));
    }

    #[test]
    fn empty_zone_list_never_matches() {
        let route = vec![Point::new(11.70, 79.70), Point::new(11.80, 79.80)];
        assert!(!route_crosses_zones(&route, &[]));
    }

    #[test]
    fn crossing_segment_returns_full_set() {
        let hit1 = zone(11.745, 79.745, 600.0);
        let hit2 = zone(11.755, 79.755, 600.0);
        let miss = zone(11.80, 79.70, 400.0);
        let a = Point::new(11.74, 79.74);
        let b = Point::new(11.76, 79.76);
        let crossing = zones_crossing_segment(a, b, &[hit1, miss, hit2]);
        let lats: Vec<f64> = crossing.iter().map(|z| z.lat).collect();
        assert_eq!(lats, vec![11.745, 11.755]);
    }
}
