//! Handler for model readiness.

use axum::Json;
use chrono::Utc;

use crate::response::{ModelStatus, ModelStatusResponse};

/// Identifiers of the scoring models served by this process.
const MODEL_IDS: [&str; 5] = [
    "anomaly_detector_v1",
    "predictive_maintenance_v1",
    "process_optimizer_v1",
    "offline_monitor_v1",
    "parameter_forecaster_v1",
];

/// GET /ai/models/status
pub async fn model_status() -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse {
        success: true,
        models: MODEL_IDS
            .into_iter()
            .map(|id| ModelStatus { id, status: "ready" })
            .collect(),
        timestamp: Utc::now(),
    })
}
