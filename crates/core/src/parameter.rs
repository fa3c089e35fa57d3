//! Wear and throughput forecasting for proposed parameter values.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fallback::first_present;
use crate::features::round_to;
use crate::severity::Severity;
use crate::types::{Metadata, Timestamp};

/// Floor on the estimated residual useful life, in hours.
pub const MINIMUM_RUL_HOURS: f64 = 6.0;
/// Residual useful life of a component running at nominal settings.
pub const BASELINE_RUL_HOURS: f64 = 72.0;
/// Lowest wear multiplier reported for an out-of-range value.
pub const MIN_WEAR_MULTIPLIER: f64 = 1.05;

const DEVIATION_WEAR_GAIN: f64 = 1.6;
const MIN_DEVIATION_WEAR: f64 = 0.15;
const BOUND_WEAR_GAIN: f64 = 0.5;

/// Context source for which no PLC cross-check is suggested.
const TELEMETRY_SOURCE: &str = "telemetry";

/// A proposed value for one component parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterEvaluation {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    pub parameter: String,
    pub proposed_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_max: Option<f64>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub context: Metadata,
}

impl ParameterEvaluation {
    /// Recommended bounds, falling back to the explicit min/max.
    pub fn effective_range(&self) -> RecommendedRange {
        RecommendedRange {
            min: first_present(self.recommended_min, self.min_value),
            max: first_present(self.recommended_max, self.max_value),
        }
    }

    fn context_source(&self) -> Option<&str> {
        self.context.get("source").and_then(Value::as_str)
    }
}

/// Operating range a value was judged against. Either side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RecommendedRange {
    /// Whether the value sits inside the range. Only decidable with both
    /// bounds known; a half-open range never contains anything.
    pub fn contains(&self, value: f64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= value && value <= max,
            _ => false,
        }
    }

    fn below_min(&self, value: f64) -> Option<f64> {
        self.min.filter(|min| value < *min)
    }

    fn above_max(&self, value: f64) -> Option<f64> {
        self.max.filter(|max| value > *max)
    }
}

/// Forecast for a parameter value outside its recommended range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterWarning {
    pub component_id: String,
    pub parameter: String,
    pub risk: Severity,
    pub throughput_impact: f64,
    pub wear_multiplier: f64,
    #[serde(rename = "estimatedRULHours")]
    pub estimated_rul_hours: f64,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
    pub value: f64,
    pub default_value: Option<f64>,
    pub recommended_range: RecommendedRange,
    pub metadata: Metadata,
}

/// Response envelope for a parameter batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterEvaluationResponse {
    pub success: bool,
    pub warnings: Vec<ParameterWarning>,
    pub timestamp: Timestamp,
}

/// Evaluate a batch, emitting warnings only for out-of-range values.
pub fn evaluate(evaluations: &[ParameterEvaluation]) -> ParameterEvaluationResponse {
    ParameterEvaluationResponse {
        success: true,
        warnings: evaluations.iter().filter_map(evaluate_single).collect(),
        timestamp: Utc::now(),
    }
}

/// Evaluate one proposal. `None` when the value is within range.
pub fn evaluate_single(evaluation: &ParameterEvaluation) -> Option<ParameterWarning> {
    let value = evaluation.proposed_value;
    let range = evaluation.effective_range();
    if range.contains(value) {
        return None;
    }

    let default_value = evaluation.default_value;
    let ratio = deviation_ratio(value, default_value);
    let wear = round_to(wear_multiplier(ratio, value, &range), 2);
    let risk = classify_risk(wear);

    Some(ParameterWarning {
        component_id: evaluation.component_id.clone(),
        parameter: evaluation.parameter.clone(),
        risk,
        throughput_impact: round_to(ratio * 100.0, 1),
        wear_multiplier: wear,
        estimated_rul_hours: round_to(MINIMUM_RUL_HOURS.max(BASELINE_RUL_HOURS / wear), 1),
        notes: build_notes(ratio, default_value, &range, value),
        suggestions: build_suggestions(evaluation, risk, value, &range),
        value,
        default_value,
        recommended_range: range,
        metadata: evaluation.metadata.clone(),
    })
}

/// Relative deviation from the default, `0` without a usable default.
pub fn deviation_ratio(value: f64, default_value: Option<f64>) -> f64 {
    match default_value {
        Some(default) if default != 0.0 => (value - default) / default,
        _ => 0.0,
    }
}

/// Heuristic wear multiplier before presentation rounding.
///
/// Starts from the deviation contribution, adds a penalty for each violated
/// non-zero bound proportional to the relative overshoot, and never drops
/// below [`MIN_WEAR_MULTIPLIER`].
pub fn wear_multiplier(ratio: f64, value: f64, range: &RecommendedRange) -> f64 {
    let mut wear = 1.0 + (ratio.abs() * DEVIATION_WEAR_GAIN).max(MIN_DEVIATION_WEAR);
    if let Some(min) = range.below_min(value).filter(|m| *m != 0.0) {
        wear += (min - value) / min.abs() * BOUND_WEAR_GAIN;
    }
    if let Some(max) = range.above_max(value).filter(|m| *m != 0.0) {
        wear += (value - max) / max.abs() * BOUND_WEAR_GAIN;
    }
    wear.max(MIN_WEAR_MULTIPLIER)
}

/// Risk tier for a wear multiplier.
pub fn classify_risk(wear: f64) -> Severity {
    if wear >= 2.0 {
        Severity::Critical
    } else if wear >= 1.5 {
        Severity::High
    } else if wear >= 1.2 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn build_notes(
    ratio: f64,
    default_value: Option<f64>,
    range: &RecommendedRange,
    value: f64,
) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(default) = default_value.filter(|d| *d != 0.0) {
        notes.push(format!(
            "Deviation {:.1}% from default ({default:?})",
            ratio * 100.0
        ));
    }
    if let Some(min) = range.below_min(value) {
        notes.push(format!("Below recommended minimum ({min:?})"));
    }
    if let Some(max) = range.above_max(value) {
        notes.push(format!("Above recommended maximum ({max:?})"));
    }
    notes
}

fn build_suggestions(
    evaluation: &ParameterEvaluation,
    risk: Severity,
    value: f64,
    range: &RecommendedRange,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    if let Some(min) = range.below_min(value) {
        suggestions.push(format!("Increase towards {min:?} to stabilize throughput"));
    }
    if let Some(max) = range.above_max(value) {
        suggestions.push(format!("Reduce closer to {max:?} to limit wear"));
    }
    if risk.is_urgent() {
        suggestions.push("Schedule maintenance inspection within the next shift".to_string());
    }
    if evaluation.context_source() != Some(TELEMETRY_SOURCE) {
        suggestions.push("Confirm PLC parameters align with dashboard settings".to_string());
    }
    suggestions
}
