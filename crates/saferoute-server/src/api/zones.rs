//! Static high-risk zone listing.

use crate::state::AppState;
use axum::{extract::State, Json};
use saferoute_core::Zone;
use std::sync::Arc;

pub async fn list_zones(State(state): State<Arc<AppState>>) -> Json<Vec<Zone>> {
    Json(state.zones.as_ref().clone())
}
