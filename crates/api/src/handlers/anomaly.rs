//! Handler for anomaly detection.

use axum::extract::State;
use axum::Json;
use mindtwin_core::anomaly::AnomalyResponse;
use mindtwin_core::telemetry::ComponentTelemetry;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::resolve_components;
use crate::state::AppState;

/// Request body for `POST /ai/anomaly/detect`.
#[derive(Debug, Deserialize)]
pub struct AnomalyRequest {
    #[serde(default)]
    pub components: Vec<ComponentTelemetry>,
}

/// POST /ai/anomaly/detect
///
/// Score each component's deviation from its historical mean.
pub async fn detect_anomalies(
    State(state): State<AppState>,
    Json(input): Json<AnomalyRequest>,
) -> AppResult<Json<AnomalyResponse>> {
    let components = resolve_components(
        &state,
        input.components,
        "No telemetry available for anomaly detection",
    )
    .await?;

    let response = state.detector.detect(&components);
    tracing::info!(
        components = components.len(),
        anomalies = response.anomalies.len(),
        threshold = state.detector.threshold(),
        "Anomaly detection completed"
    );
    Ok(Json(response))
}
