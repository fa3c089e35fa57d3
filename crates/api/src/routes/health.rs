use axum::{routing::get, Json, Router};
use chrono::Utc;
use mindtwin_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Readiness flags for each evaluator.
#[derive(Serialize)]
pub struct ModelHealth {
    pub anomaly: bool,
    pub maintenance: bool,
    pub optimization: bool,
    pub offline: bool,
    pub parameter: bool,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub timestamp: Timestamp,
    pub models: ModelHealth,
}

/// GET /health -- returns service and model readiness.
///
/// The evaluators are constructed before the server binds, so a responding
/// process always reports every model ready.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        models: ModelHealth {
            anomaly: true,
            maintenance: true,
            optimization: true,
            offline: true,
            parameter: true,
        },
    })
}

/// Mount health check routes (intended for root-level, NOT under `/ai`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
