//! SOS alert intake and listing. Alerts live in memory for the lifetime of
//! the process.

use crate::state::{AppState, SosAlert};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosRequest {
    pub tourist_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SosRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let (Some(tourist_id), Some(lat), Some(lng)) = (req.tourist_id, req.lat, req.lng) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "touristId, lat, and lng are required" })),
        ));
    };
    let alert = SosAlert {
        tourist_id,
        lat,
        lng,
        timestamp: Utc::now(),
    };
    tracing::info!(tourist_id = %alert.tourist_id, lat, lng, "SOS received");
    state.record_sos(alert.clone());
    Ok(Json(json!({
        "success": true,
        "message": "SOS sent successfully",
        "sos": alert,
    })))
}

pub async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<SosAlert>> {
    Json(state.sos_alerts())
}
