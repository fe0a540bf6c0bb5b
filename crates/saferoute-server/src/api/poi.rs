//! Point-of-interest listing.

use crate::state::{AppState, Poi};
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn list_pois(State(state): State<Arc<AppState>>) -> Json<Vec<Poi>> {
    Json(state.pois.clone())
}
