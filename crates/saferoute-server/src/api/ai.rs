//! Risk scoring and city safety advisory endpoints.

use crate::advisory::AdvisoryError;
use crate::risk::RiskAssessment;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use saferoute_core::Point;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub async fn risk_score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RiskRequest>,
) -> Result<Json<RiskAssessment>, (StatusCode, Json<Value>)> {
    let (Some(lat), Some(lng)) = (req.lat, req.lng) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "lat and lng are required" })),
        ));
    };
    Ok(Json(state.risk_model.assess(Point::new(lat, lng))))
}

pub async fn city_safety(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !state.advisory.is_configured() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "success": false, "error": "advisory service not configured" })),
        ));
    }
    match state.advisory.city_advisory(&city).await {
        Ok((weather, reply)) => Ok(Json(json!({
            "success": true,
            "reply": reply,
            "weather": weather,
        }))),
        Err(err) => {
            tracing::warn!(%err, city, "advisory lookup failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "success": false, "error": err.to_string() })),
            ))
        }
    }
}
