use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::state::AppState;

/// Application health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint handler; 503 when the store does not answer.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (code, status, database) = match state.repo().ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            warn!("Health check: database unavailable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    let health = HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };

    info!("Health check requested - status: {}", status);
    (code, Json(health))
}

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "trivia_api=info,tower_http=info".to_string());

    let filter_clone = filter.clone();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .json()
        .init();

    info!("Tracing initialized with filter: {}", filter_clone);
}
