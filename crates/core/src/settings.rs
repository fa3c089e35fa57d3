//! Service-wide scoring defaults.
//!
//! The API layer loads these from the environment; the evaluators only ever
//! receive them by reference.

/// Default anomaly severity threshold (`T`).
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 0.7;
/// Default maintenance lookahead horizon in hours.
pub const DEFAULT_MAINTENANCE_LOOKAHEAD_HOURS: u32 = 72;
/// Default optimization horizon in minutes.
pub const DEFAULT_OPTIMIZER_HORIZON_MINUTES: u32 = 30;
/// Default number of components requested from the telemetry backend.
pub const DEFAULT_TELEMETRY_LIMIT: u32 = 250;

/// Scoring defaults that requests may override where their schema allows.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub anomaly_threshold: f64,
    pub maintenance_lookahead_hours: u32,
    pub optimizer_horizon_minutes: u32,
    pub telemetry_limit: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            maintenance_lookahead_hours: DEFAULT_MAINTENANCE_LOOKAHEAD_HOURS,
            optimizer_horizon_minutes: DEFAULT_OPTIMIZER_HORIZON_MINUTES,
            telemetry_limit: DEFAULT_TELEMETRY_LIMIT,
        }
    }
}
