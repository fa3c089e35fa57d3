//! Predictive maintenance from history trends.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::features::{rolling_trend, round_to};
use crate::telemetry::ComponentTelemetry;
use crate::types::Timestamp;

/// Degradation units consumed before a component is considered failed.
const FAILURE_SCALE: f64 = 10.0;
/// Upper bound on the heuristic failure probability.
const MAX_PROBABILITY: f64 = 0.95;
/// Shortest maintenance window ever proposed, in hours.
const MIN_WINDOW_HOURS: f64 = 4.0;
/// Fraction of the time-to-failure offered as the maintenance window.
const WINDOW_FRACTION: f64 = 0.2;
const CONFIDENCE_EPSILON: f64 = 1e-3;

/// Per-component maintenance forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePrediction {
    pub component_id: String,
    pub time_to_failure_hours: f64,
    pub probability: f64,
    pub maintenance_window_hours: f64,
    pub recommended_action: String,
    pub confidence: f64,
}

/// Response envelope for a maintenance batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    pub success: bool,
    pub predictions: Vec<MaintenancePrediction>,
    pub timestamp: Timestamp,
}

/// Forecast every component over the given lookahead horizon.
pub fn predict(components: &[ComponentTelemetry], lookahead_hours: u32) -> MaintenanceResponse {
    MaintenanceResponse {
        success: true,
        predictions: components
            .iter()
            .map(|c| predict_component(c, lookahead_hours))
            .collect(),
        timestamp: Utc::now(),
    }
}

/// Forecast a single component.
pub fn predict_component(
    component: &ComponentTelemetry,
    lookahead_hours: u32,
) -> MaintenancePrediction {
    let trend = rolling_trend(component);
    let degradation = trend.rate.abs();
    let horizon = f64::from(lookahead_hours);

    let time_to_failure = if degradation == 0.0 {
        horizon
    } else {
        horizon.min(FAILURE_SCALE / degradation)
    };
    let probability = MAX_PROBABILITY.min(degradation * 2.0);
    let window = MIN_WINDOW_HOURS.max(time_to_failure * WINDOW_FRACTION);

    let name = &component.name;
    let recommended_action = if trend.rate > 0.0 {
        format!("Inspect {name} for overheating or over-speed.")
    } else {
        format!("Check {name} for stalling or under-performance.")
    };

    // The epsilon pushes the flat-trend case a hair below zero; report it as 0.
    let confidence = (1.0 - (-degradation + CONFIDENCE_EPSILON).exp()).max(0.0);

    MaintenancePrediction {
        component_id: name.clone(),
        time_to_failure_hours: round_to(time_to_failure, 2),
        probability: round_to(probability, 2),
        maintenance_window_hours: round_to(window, 2),
        recommended_action,
        confidence: round_to(confidence, 2),
    }
}
