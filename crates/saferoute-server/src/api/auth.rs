//! Digital-ID login and tourist lookup.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub digital_id: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state
        .tourists
        .iter()
        .find(|t| t.digital_id == req.digital_id)
    {
        Some(tourist) => Ok(Json(json!({ "tourist": tourist }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Digital ID not found" })),
        )),
    }
}

pub async fn get_tourist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.find_tourist(&id) {
        Some(tourist) => Ok(Json(json!({ "tourist": tourist }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Tourist not found" })),
        )),
    }
}
