use std::sync::Arc;

use mindtwin_core::anomaly::AnomalyDetector;
use mindtwin_core::ledger::AlertLedger;
use mindtwin_telemetry::{BackendDataClient, TelemetryClientError};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the scoring defaults.
    pub config: Arc<ServerConfig>,
    /// Anomaly detector, fitted once at startup and read-only afterwards.
    pub detector: Arc<AnomalyDetector>,
    /// Bounded ledger of submitted range alerts.
    pub alerts: Arc<AlertLedger>,
    /// Backend telemetry source used when a request carries no components.
    pub telemetry: Arc<BackendDataClient>,
}

impl AppState {
    /// Build the state for a configuration, fitting the anomaly detector and
    /// creating the telemetry client.
    pub fn from_config(config: ServerConfig) -> Result<Self, TelemetryClientError> {
        let telemetry = BackendDataClient::new(
            &config.backend_base_url,
            config.engine.telemetry_limit,
            config.telemetry_timeout(),
        )?;
        let detector = AnomalyDetector::new(config.engine.anomaly_threshold);

        Ok(Self {
            config: Arc::new(config),
            detector: Arc::new(detector),
            alerts: Arc::new(AlertLedger::default()),
            telemetry: Arc::new(telemetry),
        })
    }
}
