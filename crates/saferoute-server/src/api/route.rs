//! The routing endpoint: safe / fastest / shortest planning.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::planner::{PlanError, RouteMode};
use crate::state::AppState;
use saferoute_core::Point;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    #[serde(default)]
    pub mode: RouteMode,
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_profile() -> String {
    "driving".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub safe: bool,
    pub note: String,
    pub used_waypoints: Vec<Point>,
    pub route: Vec<Point>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub risk_penalty: f64,
}

pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<Value>)> {
    let (Some(start_lat), Some(start_lng), Some(end_lat), Some(end_lng)) =
        (req.start_lat, req.start_lng, req.end_lat, req.end_lng)
    else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "start and end required",
        ));
    };
    let start = Point::new(start_lat, start_lng);
    let end = Point::new(end_lat, end_lng);

    let plan = state
        .planner
        .plan(start, end, req.mode, &req.profile)
        .await
        .map_err(|err| match err {
            PlanError::InvalidInput(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            PlanError::NoRouteFound => {
                error_response(StatusCode::BAD_GATEWAY, "no route found")
            }
        })?;

    let candidate = plan.candidate;
    Ok(Json(RouteResponse {
        safe: plan.safe,
        note: plan.note,
        used_waypoints: candidate.used_waypoints,
        route: candidate.geometry,
        distance_meters: candidate.distance_m,
        duration_seconds: candidate.duration_s,
        risk_penalty: candidate.penalty,
    }))
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
