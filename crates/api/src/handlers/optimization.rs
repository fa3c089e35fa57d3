//! Handler for process optimization.

use axum::extract::State;
use axum::Json;
use mindtwin_core::fallback::positive_or;
use mindtwin_core::optimizer::{optimise as optimise_batch, Objective, OptimizationResponse};
use mindtwin_core::telemetry::ComponentTelemetry;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::resolve_components;
use crate::state::AppState;

/// Request body for `POST /ai/optimize`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    #[serde(default)]
    pub components: Vec<ComponentTelemetry>,
    /// `energy` or `throughput`; anything else optimizes throughput.
    pub objective: Option<String>,
    /// Overrides the configured optimization horizon.
    pub horizon_minutes: Option<u32>,
}

/// POST /ai/optimize
///
/// Suggest target-speed adjustments within each component's safe bounds.
pub async fn optimise(
    State(state): State<AppState>,
    Json(input): Json<OptimizationRequest>,
) -> AppResult<Json<OptimizationResponse>> {
    let components = resolve_components(
        &state,
        input.components,
        "No telemetry available for optimisation",
    )
    .await?;

    let objective = Objective::from_label(input.objective.as_deref());
    let horizon = positive_or(
        input.horizon_minutes,
        state.config.engine.optimizer_horizon_minutes,
    );
    let response = optimise_batch(&components, objective, horizon);
    tracing::info!(
        components = components.len(),
        suggestions = response.suggestions.len(),
        objective = objective.as_str(),
        "Optimization completed"
    );
    Ok(Json(response))
}
