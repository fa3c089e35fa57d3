//! Feature extraction shared by the evaluators.
//!
//! Pure functions over a single [`ComponentTelemetry`]: no state, no I/O.
//! Missing metadata degrades to neutral defaults instead of failing.

use crate::telemetry::{ComponentTelemetry, META_HISTORY_MEAN, META_HISTORY_STD};

/// Historical deviation features for one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub mean: f64,
    /// Never zero: a zero supplied deviation is reported as `1.0`.
    pub std: f64,
    pub z_score: f64,
}

/// Least-squares line fitted over a value history indexed by position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub rate: f64,
    pub intercept: f64,
}

/// Compute the z-score of the current reading against its history.
///
/// `historyMean` defaults to the current value and `historyStd` to `1.0`, so
/// a component without history yields a zero z-score. A zero deviation also
/// yields a zero z-score rather than dividing by zero.
pub fn build_feature_vector(component: &ComponentTelemetry) -> FeatureVector {
    let value = component.current_value();
    let mean = component.meta_number(META_HISTORY_MEAN).unwrap_or(value);
    let std = component.meta_number(META_HISTORY_STD).unwrap_or(1.0);

    let z_score = if std == 0.0 { 0.0 } else { (value - mean) / std };

    FeatureVector {
        mean,
        std: if std == 0.0 { 1.0 } else { std },
        z_score,
    }
}

/// Fit an ordinary-least-squares trend over the `history` metadata.
///
/// An empty history gives rate `0` and the current value as intercept.
pub fn rolling_trend(component: &ComponentTelemetry) -> Trend {
    let history = component.history();
    if history.is_empty() {
        return Trend {
            rate: 0.0,
            intercept: component.current_value(),
        };
    }

    let count = history.len() as f64;
    let mean_x = history.iter().map(|(i, _)| *i as f64).sum::<f64>() / count;
    let mean_y = history.iter().map(|(_, y)| y).sum::<f64>() / count;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in &history {
        let dx = *i as f64 - mean_x;
        numerator += dx * (y - mean_y);
        denominator += dx * dx;
    }
    // Single-point history: every index coincides with the mean.
    if denominator == 0.0 {
        denominator = 1.0;
    }

    let rate = numerator / denominator;
    Trend {
        rate,
        intercept: mean_y - rate * mean_x,
    }
}

/// Restrict `value` to `[lo, hi]`. Callers guarantee `lo <= hi`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(value.min(hi))
}

/// Round to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
