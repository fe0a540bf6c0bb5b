//! Route scoring: summed haversine length plus a per-vertex risk penalty.

use crate::models::{Point, Zone};
use crate::spatial::haversine_distance;

/// Multiplier applied to risk x penetration depth at each vertex.
/// Tuning value inherited from the original calibration; do not adjust
/// without re-tuning against the zone weights.
const DEPTH_PENALTY_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteScore {
    pub distance_m: f64,
    pub penalty: f64,
    /// distance_m + penalty.
    pub score: f64,
}

/// Score a polyline against the zone set.
///
/// The penalty accumulates per vertex rather than integrating along the path:
/// each vertex inside a zone contributes `risk x (radius - d) / radius x 10`,
/// so a route grazing a zone's edge is penalized far less than one through
/// its center. Deliberately an approximation, not a path integral.
pub fn score_route(route: &[Point], zones: &[Zone]) -> RouteScore {
    let distance_m: f64 = route
        .windows(2)
        .map(|seg| haversine_distance(seg[0], seg[1]))
        .sum();

    let mut penalty = 0.0;
    for &p in route {
        for z in zones {
            if z.radius_m <= 0.0 {
                continue;
            }
            let d = haversine_distance(p, z.center());
            if d <= z.radius_m {
                let depth = (z.radius_m - d) / z.radius_m;
                penalty += z.risk * depth * DEPTH_PENALTY_SCALE;
            }
        }
    }

    RouteScore {
        distance_m,
        penalty,
        score: distance_m + penalty,
    }
}
