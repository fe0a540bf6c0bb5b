//! API routes for the safe-route server.

pub mod ai;
pub mod auth;
pub mod poi;
pub mod route;
pub mod sos;
pub mod zones;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/tourist/:id", get(auth::get_tourist))
        .route("/api/highrisk", get(zones::list_zones))
        .route("/api/sos", post(sos::create_alert).get(sos::list_alerts))
        .route("/api/route", post(route::plan_route))
        .route("/api/pois", get(poi::list_pois))
        .route("/api/ai/risk", post(ai::risk_score))
        .route("/api/ai-safety/:city", get(ai::city_safety))
}
