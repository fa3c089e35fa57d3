//! Handlers for the range-alert ledger.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use mindtwin_core::ledger::{AlertPayload, ALERT_LEDGER_CAPACITY};

use crate::error::{AppError, AppResult};
use crate::query::LimitParams;
use crate::response::{AlertListResponse, AlertStoredResponse};
use crate::state::AppState;

/// Number of alerts listed when no `limit` is given.
const DEFAULT_LIST_LIMIT: i64 = 100;

/// POST /ai/alerts/range
///
/// Store a range alert, evicting the oldest beyond the ledger capacity.
pub async fn ingest_range_alert(
    State(state): State<AppState>,
    Json(alert): Json<AlertPayload>,
) -> Json<AlertStoredResponse> {
    tracing::debug!(
        component_id = %alert.component_id,
        parameter = %alert.parameter,
        source = %alert.source,
        "Range alert received"
    );
    let stored = state.alerts.record(alert);
    Json(AlertStoredResponse {
        success: true,
        stored,
    })
}

/// GET /ai/alerts/range
///
/// List the most recent range alerts, oldest first.
pub async fn list_range_alerts(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<AlertListResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=ALERT_LEDGER_CAPACITY as i64).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {ALERT_LEDGER_CAPACITY}"
        )));
    }

    Ok(Json(AlertListResponse {
        success: true,
        alerts: state.alerts.recent(limit as usize),
        timestamp: Utc::now(),
    }))
}
