//! HTTP gateway: axum router over [`ClimateService`].
//!
//! All routes are `GET` and read-only. Each request runs one query against the
//! shared dataset connection; the startup context is captured in [`AppState`].

mod error;
pub mod routes;

pub use error::ApiError;

use crate::climate::ClimateService;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// API version prefix shared by every data route.
pub const API_PREFIX: &str = "/api/v1.0";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClimateService>,
}

impl AppState {
    pub fn new(service: ClimateService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the router. Static paths are registered alongside the `{start}`
/// capture; axum prefers the static match.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::handle_welcome))
        .route("/api/v1.0/precipitation", get(routes::handle_precipitation))
        .route("/api/v1.0/stations", get(routes::handle_stations))
        .route("/api/v1.0/tobs", get(routes::handle_tobs))
        .route("/api/v1.0/{start}", get(routes::handle_temperature_from))
        .route("/api/v1.0/{start}/{end}", get(routes::handle_temperature_range))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run_gateway(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    tracing::info!("Serving climate API on http://{local}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
