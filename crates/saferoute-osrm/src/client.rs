//! OSRM HTTP client.

use crate::polyline;
use reqwest::Client;
use saferoute_core::Point;
use serde::Deserialize;
use std::time::Duration;

/// Errors from the routing gateway.
///
/// The planner treats every variant the same way: log it and move on with an
/// empty candidate set for that attempt.
#[derive(Debug, thiserror::Error)]
pub enum OsrmError {
    #[error("osrm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("osrm returned code {code}: {message}")]
    Rejected { code: String, message: String },
    #[error("bad route geometry: {0}")]
    Geometry(#[from] polyline::PolylineError),
}

/// A ranked route candidate from the gateway, geometry already decoded.
#[derive(Debug, Clone)]
pub struct OsrmRoute {
    pub geometry: Vec<Point>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}

/// HTTP client for an OSRM-compatible `route/v1` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

impl OsrmClient {
    /// Build a client against `base_url`. The timeout bounds every request;
    /// a slow gateway surfaces as [`OsrmError::Http`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OsrmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch routes through the ordered waypoints (start, vias, end).
    /// `alternatives` asks the service for ranked variants of the direct
    /// request; waypointed requests use `false`.
    pub async fn routes(
        &self,
        points: &[Point],
        profile: &str,
        alternatives: bool,
    ) -> Result<Vec<OsrmRoute>, OsrmError> {
        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/route/v1/{}/{}", self.base_url, profile, coords);
        tracing::debug!(%url, alternatives, "requesting routes");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline6"),
                ("steps", "false"),
                ("alternatives", if alternatives { "true" } else { "false" }),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<RouteResponse>()
            .await?;

        if response.code != "Ok" {
            return Err(OsrmError::Rejected {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        response
            .routes
            .into_iter()
            .map(|r| {
                Ok(OsrmRoute {
                    geometry: polyline::decode(&r.geometry)?,
                    distance_m: r.distance,
                    duration_s: r.duration,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_envelope() {
        let geometry = polyline::encode(&[
            Point::new(11.7488, 79.7479),
            Point::new(11.7532, 79.7611),
        ]);
        let raw = serde_json::json!({
            "code": "Ok",
            "routes": [
                { "geometry": geometry, "distance": 1825.4, "duration": 210.0, "legs": [] }
            ],
            "waypoints": []
        });
        let parsed: RouteResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.code, "Ok");
        assert_eq!(parsed.routes.len(), 1);
        let decoded = polyline::decode(&parsed.routes[0].geometry).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!((decoded[0].lat - 11.7488).abs() < 1e-6);
    }

    #[test]
    fn non_ok_code_parses_with_message() {
        let raw = serde_json::json!({ "code": "NoRoute", "message": "Impossible route." });
        let parsed: RouteResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.code, "NoRoute");
        assert_eq!(parsed.message.as_deref(), Some("Impossible route."));
        assert!(parsed.routes.is_empty());
    }
}
