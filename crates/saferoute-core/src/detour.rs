//! Detour waypoint synthesis around circular zones.

use crate::models::{Point, Zone};
use crate::spatial::{chord_position, from_local_xy, to_local_xy};
use std::f64::consts::FRAC_PI_2;

/// Which side of the start->end chord to bypass a zone on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Rotate the center->projection direction by +90 degrees.
    Left,
    /// Rotate by -90 degrees.
    Right,
}

impl Side {
    pub fn flipped(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn rotation(self) -> f64 {
        match self {
            Side::Left => FRAC_PI_2,
            Side::Right => -FRAC_PI_2,
        }
    }
}

/// One round of waypoint generation: a side choice per target zone plus a
/// clearance margin beyond each zone's radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub sides: Vec<Side>,
    pub margin_m: f64,
}

/// Compute a bypass waypoint for `zone` relative to the `start -> end` chord.
///
/// Projects the zone center onto the chord (clamped to the segment), rotates
/// the center->projection direction by +-90 degrees per `side`, and places
/// the point `radius + margin` meters from the center along that direction.
pub fn detour_point(start: Point, end: Point, zone: &Zone, side: Side, margin_m: f64) -> Point {
    let (bx, by) = to_local_xy(start, end);
    let (zx, zy) = to_local_xy(start, zone.center());

    let len_sq = bx * bx + by * by;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((zx * bx + zy * by) / len_sq).clamp(0.0, 1.0)
    };
    let proj_x = t * bx;
    let proj_y = t * by;

    let angle = (proj_y - zy).atan2(proj_x - zx) + side.rotation();
    let r = zone.radius_m + margin_m;
    from_local_xy(start, zx + r * angle.cos(), zy + r * angle.sin())
}

/// Order detour waypoints by their projection parameter along the chord so
/// the gateway receives them in traversal order.
pub fn order_along_chord(start: Point, end: Point, mut waypoints: Vec<Point>) -> Vec<Point> {
    waypoints.sort_by(|a, b| {
        let ta = chord_position(start, end, *a);
        let tb = chord_position(start, end, *b);
        ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
    });
    waypoints
}

/// The fixed strategy list, in evaluation order: both sides at the base
/// margin, each single zone flipped at a wider margin, then both sides again
/// at the widest margin. Deterministic for a given zone count.
pub fn attempt_plan(zone_count: usize) -> Vec<Attempt> {
    let mut attempts = Vec::with_capacity(zone_count + 4);
    attempts.push(Attempt {
        sides: vec![Side::Left; zone_count],
        margin_m: 60.0,
    });
    attempts.push(Attempt {
        sides: vec![Side::Right; zone_count],
        margin_m: 60.0,
    });
    for i in 0..zone_count {
        let mut sides = vec![Side::Left; zone_count];
        sides[i] = Side::Right;
        attempts.push(Attempt {
            sides,
            margin_m: 80.0,
        });
    }
    attempts.push(Attempt {
        sides: vec![Side::Left; zone_count],
        margin_m: 120.0,
    });
    attempts.push(Attempt {
        sides: vec![Side::Right; zone_count],
        margin_m: 120.0,
    });
    attempts
}
