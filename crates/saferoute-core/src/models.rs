//! Core data models for the safe-routing pipeline.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Risk weight applied when a zone does not declare one.
pub const DEFAULT_RISK_WEIGHT: f64 = 80.0;

/// A circular exclusion area ("geofence") with an optional risk weighting.
///
/// Field names match the zone data file: `radius` is in meters, `risk` is the
/// scorer weight, `type` is an informational severity label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Radius in meters. Never negative after load validation.
    #[serde(rename = "radius")]
    pub radius_m: f64,
    #[serde(default = "default_risk")]
    pub risk: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ZoneLevel>,
}

fn default_risk() -> f64 {
    DEFAULT_RISK_WEIGHT
}

impl Zone {
    pub fn center(&self) -> Point {
        Point::new(self.lat, self.lng)
    }
}

/// Severity label carried by the zone data file. Informational only; the
/// scorer uses the numeric risk weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLevel {
    High,
    Low,
}

/// A decoded, scored route returned by or derived from the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub geometry: Vec<Point>,
    /// Total distance reported by the gateway, in meters.
    pub distance_m: f64,
    /// Total duration reported by the gateway, in seconds.
    pub duration_s: f64,
    pub penalty: f64,
    /// Polyline length plus penalty; the ranking order.
    pub score: f64,
    pub used_waypoints: Vec<Point>,
}
