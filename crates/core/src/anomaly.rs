//! Anomaly scoring over historical z-scores.
//!
//! The decision surface is fitted once from a fixed baseline when the
//! detector is built and is immutable afterwards, so a single
//! [`AnomalyDetector`] can be shared across requests behind an `Arc`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::features::{build_feature_vector, round_to};
use crate::severity::Severity;
use crate::telemetry::ComponentTelemetry;
use crate::types::Timestamp;

/// Trivial baseline the surface is fitted on at startup (neutral, ±1σ).
pub const BASELINE_SAMPLE: [f64; 3] = [0.0, 1.0, -1.0];

/// Number of baseline spreads at which the score reaches `1.0`.
pub const SCORE_SPAN: f64 = 2.5;

/// Multiplier on the threshold at or above which severity is critical.
const CRITICAL_FACTOR: f64 = 1.5;
/// Multiplier on the threshold at or above which severity is medium.
const MEDIUM_FACTOR: f64 = 0.6;

/// Fixed mapping from z-score to anomaly score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionSurface {
    spread: f64,
}

impl DecisionSurface {
    /// Fit the surface on a baseline of neutral-ish z-scores.
    ///
    /// The spread is the largest distance of any baseline point from the
    /// neutral reading; an empty or all-zero baseline falls back to `1.0`.
    pub fn fit(baseline: &[f64]) -> Self {
        let spread = baseline
            .iter()
            .map(|x| x.abs())
            .filter(|x| x.is_finite())
            .fold(0.0_f64, f64::max);
        Self {
            spread: if spread > 0.0 { spread } else { 1.0 },
        }
    }

    /// Score a z-score. Zero for a neutral reading, increasing in `|z|`.
    pub fn score(&self, z_score: f64) -> f64 {
        z_score.abs() / (SCORE_SPAN * self.spread)
    }
}

/// Per-component anomaly verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    pub component_id: String,
    pub score: f64,
    pub severity: Severity,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

/// Response envelope for an anomaly batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub success: bool,
    pub anomalies: Vec<AnomalyResult>,
    pub timestamp: Timestamp,
}

/// Scores telemetry batches against the fitted decision surface.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    surface: DecisionSurface,
    threshold: f64,
}

impl AnomalyDetector {
    /// Build a detector with the given severity threshold, fitting the
    /// decision surface on [`BASELINE_SAMPLE`].
    pub fn new(threshold: f64) -> Self {
        Self {
            surface: DecisionSurface::fit(&BASELINE_SAMPLE),
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score every component in the batch.
    pub fn detect(&self, components: &[ComponentTelemetry]) -> AnomalyResponse {
        AnomalyResponse {
            success: true,
            anomalies: components.iter().map(|c| self.evaluate(c)).collect(),
            timestamp: Utc::now(),
        }
    }

    /// Score a single component.
    pub fn evaluate(&self, component: &ComponentTelemetry) -> AnomalyResult {
        let features = build_feature_vector(component);
        let score = self.surface.score(features.z_score);
        let severity = self.classify(score);

        AnomalyResult {
            component_id: component.name.clone(),
            score: round_to(score, 3),
            severity,
            explanation: explain(&component.name, features.z_score, score),
            recommendations: recommend(&component.name, severity),
        }
    }

    /// Map a score onto the four-tier severity scale.
    pub fn classify(&self, score: f64) -> Severity {
        let t = self.threshold;
        if score >= t * CRITICAL_FACTOR {
            Severity::Critical
        } else if score >= t {
            Severity::High
        } else if score >= t * MEDIUM_FACTOR {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

fn explain(name: &str, z_score: f64, score: f64) -> String {
    let direction = if z_score > 0.0 { "above" } else { "below" };
    format!(
        "{name} deviates {:.2}σ {direction} rolling mean (anomaly score {score:.2}).",
        z_score.abs()
    )
}

fn recommend(name: &str, severity: Severity) -> Vec<String> {
    match severity {
        Severity::Critical | Severity::High => vec![
            format!("Inspect {name} immediately"),
            "Verify PLC mode and safety ranges".to_string(),
        ],
        Severity::Medium => vec![format!("Monitor {name} closely over the next cycle")],
        _ => vec!["No action required".to_string()],
    }
}
