//! Shared application state and reference-data loading.

use crate::advisory::AdvisoryService;
use crate::config::Config;
use crate::planner::RoutePlanner;
use crate::risk::ZoneRiskModel;
use chrono::{DateTime, Utc};
use saferoute_core::Zone;
use saferoute_osrm::OsrmClient;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A registered tourist record from the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tourist {
    pub id: String,
    pub digital_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<String>,
}

/// A point of interest shown to tourists.
#[derive(Debug, Clone, Serialize)]
pub struct Poi {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub lat: f64,
    pub lon: f64,
}

/// An SOS alert. Held in memory for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SosAlert {
    pub tourist_id: String,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

/// Application state. The zone list, tourist registry, and POIs are loaded
/// once at startup and never mutated; only the SOS log is written to.
pub struct AppState {
    pub zones: Arc<Vec<Zone>>,
    pub tourists: Vec<Tourist>,
    pub pois: Vec<Poi>,
    pub planner: RoutePlanner<OsrmClient>,
    pub risk_model: ZoneRiskModel,
    pub advisory: AdvisoryService,
    sos_alerts: RwLock<Vec<SosAlert>>,
}

impl AppState {
    /// Build state from configuration, loading reference data from disk.
    /// Data problems degrade to empty lists; only HTTP client construction
    /// can fail here.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let zones = load_zones(&config.zones_file);
        let tourists = load_tourists(&config.tourists_file);
        Self::with_data(&config, zones, tourists)
    }

    /// Build state around explicit zone and tourist sets. Used by `new` and
    /// by tests that need synthetic data.
    pub fn with_data(
        config: &Config,
        zones: Vec<Zone>,
        tourists: Vec<Tourist>,
    ) -> anyhow::Result<Self> {
        let zones = Arc::new(zones);
        let gateway = OsrmClient::new(config.osrm_url.clone(), config.http_timeout)?;
        let advisory = AdvisoryService::new(
            config.weather_api_key.clone(),
            config.openai_api_key.clone(),
            config.http_timeout,
        )?;
        Ok(Self {
            planner: RoutePlanner::new(gateway, Arc::clone(&zones)),
            risk_model: ZoneRiskModel::new(Arc::clone(&zones)),
            advisory,
            zones,
            tourists,
            pois: default_pois(),
            sos_alerts: RwLock::new(Vec::new()),
        })
    }

    pub fn record_sos(&self, alert: SosAlert) {
        if let Ok(mut alerts) = self.sos_alerts.write() {
            alerts.push(alert);
        }
    }

    pub fn sos_alerts(&self) -> Vec<SosAlert> {
        self.sos_alerts
            .read()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }

    /// Look up a tourist by internal id or digital id.
    pub fn find_tourist(&self, key: &str) -> Option<&Tourist> {
        self.tourists
            .iter()
            .find(|t| t.id == key || t.digital_id == key)
    }
}

/// Load the zone list. Absence or parse failure degrades to an empty list
/// with a warning; the planner then passes routes through unfiltered.
pub fn load_zones(path: &str) -> Vec<Zone> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path, %err, "could not read zone file; running with no zones");
            return Vec::new();
        }
    };
    let mut zones: Vec<Zone> = match serde_json::from_str(&raw) {
        Ok(zones) => zones,
        Err(err) => {
            tracing::warn!(path, %err, "could not parse zone file; running with no zones");
            return Vec::new();
        }
    };
    let before = zones.len();
    zones.retain(|z| z.radius_m.is_finite() && z.radius_m >= 0.0);
    if zones.len() < before {
        tracing::warn!(
            dropped = before - zones.len(),
            "dropped zones with invalid radius"
        );
    }
    zones
}

/// Load the tourist registry, degrading to empty on any failure.
pub fn load_tourists(path: &str) -> Vec<Tourist> {
    let parsed = std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| serde_json::from_str(&raw).map_err(anyhow::Error::from));
    match parsed {
        Ok(tourists) => tourists,
        Err(err) => {
            tracing::warn!(path, %err, "could not load tourist registry; running with none");
            Vec::new()
        }
    }
}

fn default_pois() -> Vec<Poi> {
    vec![
        Poi {
            id: "1".to_string(),
            title: "Heritage Monument".to_string(),
            desc: "Built in 1890.".to_string(),
            lat: 12.9352,
            lon: 80.1146,
        },
        Poi {
            id: "2".to_string(),
            title: "Town Library".to_string(),
            desc: "Open 9 AM - 6 PM".to_string(),
            lat: 12.9345,
            lon: 80.1150,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_zone_file_degrades_to_empty() {
        assert!(load_zones("/nonexistent/zones.json").is_empty());
    }

    #[test]
    fn unparseable_zone_file_degrades_to_empty() {
        let path = std::env::temp_dir().join("saferoute-bad-zones.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_zones(path.to_str().unwrap()).is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn negative_radius_zones_are_dropped() {
        let path = std::env::temp_dir().join("saferoute-negative-radius.json");
        std::fs::write(
            &path,
            r#"[
                { "name": "ok", "lat": 11.7, "lng": 79.7, "radius": 500 },
                { "name": "bad", "lat": 11.8, "lng": 79.8, "radius": -10 }
            ]"#,
        )
        .unwrap();
        let zones = load_zones(path.to_str().unwrap());
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "ok");
        let _ = std::fs::remove_file(&path);
    }
}
