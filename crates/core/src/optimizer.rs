//! Process optimization of the target-speed control parameter.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::{clamp, round_to};
use crate::telemetry::ComponentTelemetry;
use crate::types::Timestamp;

/// The single control parameter the optimizer tunes.
pub const TARGET_SPEED: &str = "TargetSpeed";
pub const META_MIN_SPEED: &str = "minSpeed";
pub const META_MAX_SPEED: &str = "maxSpeed";

const DEFAULT_MIN_FACTOR: f64 = 0.5;
const DEFAULT_MAX_FACTOR: f64 = 1.2;
const ENERGY_STEP: f64 = -0.1;
const THROUGHPUT_STEP: f64 = 0.15;
/// Smallest denominator used when expressing the change as a fraction.
const MIN_IMPACT_BASE: f64 = 1e-3;

/// Optimization goal. Anything other than `energy` optimizes throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    Throughput,
    Energy,
}

impl Objective {
    /// Parse a free-form objective label.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l == "energy" => Self::Energy,
            _ => Self::Throughput,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Throughput => "throughput",
            Self::Energy => "energy",
        }
    }
}

/// Estimated effect of applying a suggestion, in relative units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedImpact {
    pub throughput: f64,
    pub energy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_minutes: Option<u32>,
}

/// Safe operating bounds the recommendation was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeRange {
    pub min: f64,
    pub max: f64,
}

/// Per-component parameter adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    pub component_id: String,
    pub parameter: String,
    pub current: f64,
    pub recommended: f64,
    pub constraints_respected: bool,
    pub expected_impact: ExpectedImpact,
    pub safe_range: SafeRange,
    pub explanation: String,
}

/// Response envelope for an optimization batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub success: bool,
    pub suggestions: Vec<OptimizationSuggestion>,
    pub timestamp: Timestamp,
}

/// Suggest adjustments for every component that has a usable current value.
pub fn optimise(
    components: &[ComponentTelemetry],
    objective: Objective,
    horizon_minutes: u32,
) -> OptimizationResponse {
    OptimizationResponse {
        success: true,
        suggestions: components
            .iter()
            .filter_map(|c| optimise_component(c, objective, horizon_minutes))
            .collect(),
        timestamp: Utc::now(),
    }
}

/// Suggest an adjustment for one component.
///
/// Returns `None` when neither a non-zero `TargetSpeed` metadata entry nor a
/// telemetry value is available.
pub fn optimise_component(
    component: &ComponentTelemetry,
    objective: Objective,
    horizon_minutes: u32,
) -> Option<OptimizationSuggestion> {
    let current = component
        .meta_number(TARGET_SPEED)
        .filter(|v| *v != 0.0)
        .or(component.value)?;

    let (range, [min_label, max_label]) = safe_range(component, current);
    let delta = match objective {
        Objective::Energy => ENERGY_STEP * current,
        Objective::Throughput => THROUGHPUT_STEP * current,
    };
    let recommended = clamp(current + delta, range.min, range.max);

    let explanation = format!(
        "Adjusting {} by {:+.1} targets {} improvement while respecting [{min_label}, {max_label}].",
        component.name,
        recommended - current,
        objective.as_str(),
    );

    Some(OptimizationSuggestion {
        component_id: component.name.clone(),
        parameter: TARGET_SPEED.to_string(),
        current: round_to(current, 2),
        recommended: round_to(recommended, 2),
        constraints_respected: true,
        expected_impact: impact(current, recommended, objective, horizon_minutes),
        safe_range: range,
        explanation,
    })
}

/// Resolve the safe bounds, ordering them so `min <= max` even for negative
/// readings or inconsistent metadata.
///
/// Also returns each bound's display form: metadata numbers as supplied
/// (`105`), derived defaults as floats (`120.0`).
fn safe_range(component: &ComponentTelemetry, current: f64) -> (SafeRange, [String; 2]) {
    let min = bound(component, META_MIN_SPEED, current * DEFAULT_MIN_FACTOR);
    let max = bound(component, META_MAX_SPEED, current * DEFAULT_MAX_FACTOR);
    let (lo, hi) = if min.0 <= max.0 { (min, max) } else { (max, min) };
    (
        SafeRange {
            min: lo.0,
            max: hi.0,
        },
        [lo.1, hi.1],
    )
}

fn bound(component: &ComponentTelemetry, key: &str, default: f64) -> (f64, String) {
    match component.metadata.get(key) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => (v, n.to_string()),
            None => (default, format!("{default:?}")),
        },
        _ => (default, format!("{default:?}")),
    }
}

fn impact(current: f64, recommended: f64, objective: Objective, horizon_minutes: u32) -> ExpectedImpact {
    let fraction = (recommended - current) / current.max(MIN_IMPACT_BASE);
    match objective {
        Objective::Energy => ExpectedImpact {
            energy: round_to(-fraction * 8.0, 2),
            throughput: round_to(fraction * -2.0, 2),
            horizon_minutes: None,
        },
        Objective::Throughput => ExpectedImpact {
            throughput: round_to(fraction * 12.0, 2),
            energy: round_to(fraction * 3.0, 2),
            horizon_minutes: Some(horizon_minutes),
        },
    }
}
