//! Shared response envelope types for API handlers.
//!
//! Evaluator endpoints return the envelopes defined in `mindtwin_core`
//! (`{ "success", <results>, "timestamp" }`). The types here cover the
//! remaining endpoints with the same shape.

use mindtwin_core::ledger::AlertPayload;
use mindtwin_core::types::Timestamp;
use serde::Serialize;

/// Acknowledgement for a stored range alert.
#[derive(Debug, Serialize)]
pub struct AlertStoredResponse {
    pub success: bool,
    /// Number of alerts held by the ledger after the append.
    pub stored: usize,
}

/// Listing of recently stored range alerts, oldest first.
#[derive(Debug, Serialize)]
pub struct AlertListResponse {
    pub success: bool,
    pub alerts: Vec<AlertPayload>,
    pub timestamp: Timestamp,
}

/// Readiness of a single scoring model.
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub id: &'static str,
    pub status: &'static str,
}

/// Readiness of every scoring model.
#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub success: bool,
    pub models: Vec<ModelStatus>,
    pub timestamp: Timestamp,
}
