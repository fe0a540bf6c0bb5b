//! Deterministic location risk model.
//!
//! Scores a point from the configured zones so identical requests always get
//! identical answers, which keeps the endpoint testable.

use saferoute_core::{haversine_distance, Point, Zone};
use serde::Serialize;
use std::sync::Arc;

/// Zones within this multiple of their radius still contribute a reduced
/// "nearby" score.
const NEARBY_RADIUS_FACTOR: f64 = 2.0;

pub struct ZoneRiskModel {
    zones: Arc<Vec<Zone>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub reasons: Vec<String>,
}

impl ZoneRiskModel {
    pub fn new(zones: Arc<Vec<Zone>>) -> Self {
        Self { zones }
    }

    /// Score 0-100. The deepest containing zone dominates; zones within
    /// twice their radius contribute a reduced score.
    pub fn assess(&self, location: Point) -> RiskAssessment {
        let mut score = 0.0f64;
        let mut reasons = Vec::new();
        for zone in self.zones.iter() {
            if zone.radius_m <= 0.0 {
                continue;
            }
            let d = haversine_distance(location, zone.center());
            let weight = zone.risk.min(100.0);
            if d <= zone.radius_m {
                let depth = (zone.radius_m - d) / zone.radius_m;
                score = score.max(weight * (0.5 + 0.5 * depth));
                reasons.push(format!("Inside high-risk zone {}", zone.name));
            } else if d <= zone.radius_m * NEARBY_RADIUS_FACTOR {
                score = score.max(weight * 0.3);
                reasons.push(format!("Near high-risk zone {}", zone.name));
            }
        }
        if reasons.is_empty() {
            reasons.push("Normal conditions".to_string());
        }
        RiskAssessment {
            risk_score: score.round().clamp(0.0, 100.0) as u32,
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(zones: Vec<Zone>) -> ZoneRiskModel {
        ZoneRiskModel::new(Arc::new(zones))
    }

    fn zone(name: &str, lat: f64, lng: f64, radius_m: f64, risk: f64) -> Zone {
        Zone {
            name: name.to_string(),
            lat,
            lng,
            radius_m,
            risk,
            level: None,
        }
    }

    #[test]
    fn clear_location_scores_zero() {
        let m = model(vec![zone("A", 11.75, 79.75, 500.0, 80.0)]);
        let out = m.assess(Point::new(12.5, 80.5));
        assert_eq!(out.risk_score, 0);
        assert_eq!(out.reasons, vec!["Normal conditions".to_string()]);
    }

    #[test]
    fn zone_center_scores_full_weight() {
        let m = model(vec![zone("A", 11.75, 79.75, 500.0, 80.0)]);
        let out = m.assess(Point::new(11.75, 79.75));
        assert_eq!(out.risk_score, 80);
        assert_eq!(out.reasons, vec!["Inside high-risk zone A".to_string()]);
    }

    #[test]
    fn assessments_are_deterministic() {
        let m = model(vec![
            zone("A", 11.75, 79.75, 500.0, 80.0),
            zone("B", 11.76, 79.76, 700.0, 40.0),
        ]);
        let p = Point::new(11.7505, 79.7505);
        let first = m.assess(p);
        let second = m.assess(p);
        assert_eq!(first.risk_score, second.risk_score);
        assert_eq!(first.reasons, second.reasons);
    }

    #[test]
    fn nearby_zone_scores_less_than_inside() {
        let m = model(vec![zone("A", 11.75, 79.75, 500.0, 80.0)]);
        // ~750m out: within 2x radius but outside the circle.
        let nearby = m.assess(Point::new(11.75 + 750.0 / 111_194.0, 79.75));
        let inside = m.assess(Point::new(11.75, 79.75));
        assert!(nearby.risk_score > 0);
        assert!(nearby.risk_score < inside.risk_score);
        assert_eq!(nearby.reasons, vec!["Near high-risk zone A".to_string()]);
    }
}
