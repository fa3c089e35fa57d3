//! Handler for predictive maintenance.

use axum::extract::State;
use axum::Json;
use mindtwin_core::fallback::positive_or;
use mindtwin_core::maintenance::{predict, MaintenanceResponse};
use mindtwin_core::telemetry::ComponentTelemetry;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::resolve_components;
use crate::state::AppState;

/// Request body for `POST /ai/maintenance/predict`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    #[serde(default)]
    pub components: Vec<ComponentTelemetry>,
    /// Overrides the configured lookahead horizon.
    pub lookahead_hours: Option<u32>,
}

/// POST /ai/maintenance/predict
///
/// Forecast time-to-failure from each component's value history.
pub async fn predict_maintenance(
    State(state): State<AppState>,
    Json(input): Json<MaintenanceRequest>,
) -> AppResult<Json<MaintenanceResponse>> {
    let components = resolve_components(
        &state,
        input.components,
        "No telemetry available for maintenance prediction",
    )
    .await?;

    let lookahead = positive_or(
        input.lookahead_hours,
        state.config.engine.maintenance_lookahead_hours,
    );
    let response = predict(&components, lookahead);
    tracing::info!(
        components = components.len(),
        lookahead_hours = lookahead,
        "Maintenance prediction completed"
    );
    Ok(Json(response))
}
