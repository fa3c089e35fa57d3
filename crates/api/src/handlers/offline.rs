//! Handler for heartbeat-gap evaluation.

use axum::Json;
use mindtwin_core::offline::{evaluate, OfflineComponentState, OfflineEvaluationResponse};
use mindtwin_core::validation::validate_batch_not_empty;
use serde::Deserialize;

use crate::error::AppResult;

/// Request body for `POST /ai/offline/evaluate`.
#[derive(Debug, Deserialize)]
pub struct OfflineEvaluationRequest {
    #[serde(default)]
    pub components: Vec<OfflineComponentState>,
}

/// POST /ai/offline/evaluate
///
/// Classify heartbeat gaps and manual-offline flags into alerts.
pub async fn evaluate_offline(
    Json(input): Json<OfflineEvaluationRequest>,
) -> AppResult<Json<OfflineEvaluationResponse>> {
    validate_batch_not_empty(
        &input.components,
        "No components provided for offline evaluation",
    )?;

    let response = evaluate(&input.components);
    let auto_stops = response
        .alerts
        .iter()
        .filter(|a| a.auto_stop_recommended)
        .count();
    if auto_stops > 0 {
        tracing::warn!(auto_stops, "Emergency stop recommended for offline components");
    }
    tracing::info!(
        components = input.components.len(),
        alerts = response.alerts.len(),
        "Offline evaluation completed"
    );
    Ok(Json(response))
}
