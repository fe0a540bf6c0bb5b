//! Safe-route backend server binary.

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use saferoute_server::api;
use saferoute_server::config::Config;
use saferoute_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("saferoute_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting safe-route server...");

    let config = Config::from_env();
    let port = config.server_port;
    let state = Arc::new(AppState::new(config)?);
    tracing::info!(zones = state.zones.len(), tourists = state.tourists.len(), "loaded reference data");

    // Build the app
    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
