//! Heartbeat-gap evaluation and emergency escalation.
//!
//! Each component is scored independently. Manual offline flags take
//! precedence over the measured gap; otherwise the gap is compared with the
//! heartbeat timeout and the offline threshold, and the criticality tier
//! decides how hard an unreachable component escalates.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::fallback::positive_ms_or;
use crate::features::round_to;
use crate::severity::Severity;
use crate::telemetry::metadata_text;
use crate::types::{Metadata, Timestamp};

/// Gap after which an unreachable component escalates by criticality.
pub const DEFAULT_THRESHOLD_MS: i64 = 8000;
/// Gap below which a component is still considered live.
pub const DEFAULT_HEARTBEAT_TIMEOUT_MS: i64 = 4000;

pub const META_MANUAL_OFFLINE_REASON: &str = "manualOfflineReason";
pub const META_LAST_HEARTBEAT: &str = "lastHeartbeat";

/// Operator-assigned importance of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    High,
    Medium,
    #[default]
    Low,
}

impl Criticality {
    /// Case-insensitive parse; unknown or missing labels are `Low`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::to_ascii_lowercase).as_deref() {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Heartbeat snapshot for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineComponentState {
    pub component_id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub gap_ms: i64,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_offline: Option<bool>,
    /// Accepted for compatibility but never read; reasons use
    /// `metadata.lastHeartbeat`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_timeout_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<bool>,
}

impl OfflineComponentState {
    pub fn criticality_tier(&self) -> Criticality {
        Criticality::from_label(self.criticality.as_deref())
    }

    fn is_manual(&self) -> bool {
        self.manual_offline == Some(true) || self.manual_override == Some(true)
    }
}

/// Connectivity-loss alert for one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineAlert {
    pub component_id: String,
    pub severity: Severity,
    pub gap_seconds: f64,
    pub recommendation: String,
    pub likelihood: f64,
    pub reason: String,
    pub auto_stop_recommended: bool,
    pub metadata: Metadata,
}

/// Response envelope for an offline batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineEvaluationResponse {
    pub success: bool,
    pub alerts: Vec<OfflineAlert>,
    pub timestamp: Timestamp,
}

/// Outcome of scoring one component before the alert is assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Verdict {
    severity: Severity,
    likelihood: f64,
    recommendation: &'static str,
    auto_stop: bool,
}

impl Verdict {
    fn new(severity: Severity, likelihood: f64, recommendation: &'static str) -> Self {
        Self {
            severity,
            likelihood,
            recommendation,
            auto_stop: false,
        }
    }

    fn with_auto_stop(mut self) -> Self {
        self.auto_stop = true;
        self
    }
}

/// Evaluate a batch, emitting alerts only for components that need one.
pub fn evaluate(components: &[OfflineComponentState]) -> OfflineEvaluationResponse {
    OfflineEvaluationResponse {
        success: true,
        alerts: components.iter().filter_map(evaluate_component).collect(),
        timestamp: Utc::now(),
    }
}

/// Evaluate one component. `None` means the component is live.
pub fn evaluate_component(component: &OfflineComponentState) -> Option<OfflineAlert> {
    let gap_seconds = component.gap_ms as f64 / 1000.0;
    let verdict = score(component, gap_seconds)?;

    Some(OfflineAlert {
        component_id: component.component_id.clone(),
        severity: verdict.severity,
        gap_seconds: round_to(gap_seconds, 2),
        recommendation: verdict.recommendation.to_string(),
        likelihood: verdict.likelihood,
        reason: build_reason(component, gap_seconds),
        auto_stop_recommended: verdict.auto_stop,
        metadata: component.metadata.clone(),
    })
}

fn score(component: &OfflineComponentState, gap_seconds: f64) -> Option<Verdict> {
    let criticality = component.criticality_tier();
    if component.is_manual() {
        return Some(manual_verdict(criticality));
    }

    let threshold = positive_ms_or(component.threshold_ms, DEFAULT_THRESHOLD_MS) as f64 / 1000.0;
    let heartbeat = positive_ms_or(component.heartbeat_timeout_ms, DEFAULT_HEARTBEAT_TIMEOUT_MS)
        as f64
        / 1000.0;

    if gap_seconds < heartbeat {
        return None;
    }
    if gap_seconds < threshold {
        return Some(Verdict::new(
            Severity::Warning,
            0.4,
            "Monitor component connectivity",
        ));
    }

    Some(match criticality {
        Criticality::High => {
            Verdict::new(Severity::Critical, 0.9, "Prepare/trigger emergency stop").with_auto_stop()
        }
        Criticality::Medium => {
            Verdict::new(Severity::High, 0.7, "Alert operator and slow production")
        }
        Criticality::Low => {
            Verdict::new(Severity::Medium, 0.55, "Log issue and plan manual recovery")
        }
    })
}

fn manual_verdict(criticality: Criticality) -> Verdict {
    match criticality {
        Criticality::High => Verdict::new(
            Severity::Critical,
            0.95,
            "Critical component manually disabled – trigger emergency stop",
        )
        .with_auto_stop(),
        Criticality::Medium => Verdict::new(
            Severity::High,
            0.75,
            "Important component manually disabled – alert operator",
        ),
        Criticality::Low => Verdict::new(
            Severity::Warning,
            0.4,
            "Non-critical component manually disabled",
        ),
    }
}

fn build_reason(component: &OfflineComponentState, gap_seconds: f64) -> String {
    let mut pieces = vec![format!("Heartbeat silent for {gap_seconds:.1}s")];
    if let Some(status) = component.status.as_deref().filter(|s| !s.is_empty()) {
        pieces.push(format!("last status '{status}'"));
    }
    if component.manual_offline == Some(true) {
        pieces.push("manual offline flag detected".to_string());
    }
    if let Some(reason) = metadata_text(&component.metadata, META_MANUAL_OFFLINE_REASON) {
        pieces.push(format!("reason: {reason}"));
    }
    if let Some(heartbeat) = metadata_text(&component.metadata, META_LAST_HEARTBEAT) {
        pieces.push(format!("last heartbeat {heartbeat}"));
    }
    pieces.join(" | ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state(gap_ms: i64, criticality: &str) -> OfflineComponentState {
        OfflineComponentState {
            component_id: "Robot1".to_string(),
            gap_ms,
            criticality: Some(criticality.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn gap_below_heartbeat_never_alerts() {
        for criticality in ["high", "medium", "low"] {
            assert!(evaluate_component(&state(3999, criticality)).is_none());
        }
    }

    #[test]
    fn gap_between_timeout_and_threshold_warns() {
        let alert = evaluate_component(&state(5000, "high")).unwrap();
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.likelihood, 0.4);
        assert_eq!(alert.recommendation, "Monitor component connectivity");
        assert!(!alert.auto_stop_recommended);
    }

    #[test]
    fn unreachable_high_criticality_triggers_auto_stop() {
        let mut component = state(20000, "high");
        component.threshold_ms = Some(8000);
        component.heartbeat_timeout_ms = Some(4000);
        let alert = evaluate_component(&component).unwrap();
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.likelihood, 0.9);
        assert!(alert.auto_stop_recommended);
        assert_eq!(alert.gap_seconds, 20.0);
        assert_eq!(alert.reason, "Heartbeat silent for 20.0s");
    }

    #[test]
    fn unreachable_medium_and_low_escalate_by_tier() {
        let medium = evaluate_component(&state(9000, "medium")).unwrap();
        assert_eq!(medium.severity, Severity::High);
        assert_eq!(medium.likelihood, 0.7);
        assert!(!medium.auto_stop_recommended);

        let low = evaluate_component(&state(9000, "low")).unwrap();
        assert_eq!(low.severity, Severity::Medium);
        assert_eq!(low.likelihood, 0.55);
    }

    #[test]
    fn criticality_defaults_to_low_and_ignores_case() {
        let mut component = state(9000, "HIGH");
        assert_eq!(component.criticality_tier(), Criticality::High);
        component.criticality = None;
        assert_eq!(component.criticality_tier(), Criticality::Low);
        component.criticality = Some("unknown".into());
        assert_eq!(component.criticality_tier(), Criticality::Low);
    }

    #[test]
    fn manual_offline_high_is_critical_regardless_of_gap() {
        for gap in [0, 1000, 50_000] {
            let mut component = state(gap, "high");
            component.manual_offline = Some(true);
            let alert = evaluate_component(&component).unwrap();
            assert_eq!(alert.severity, Severity::Critical);
            assert_eq!(alert.likelihood, 0.95);
            assert!(alert.auto_stop_recommended);
        }
    }

    #[test]
    fn manual_override_uses_tier_table() {
        let mut medium = state(0, "medium");
        medium.manual_override = Some(true);
        let alert = evaluate_component(&medium).unwrap();
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.likelihood, 0.75);
        // Override alone is not reported as the manual-offline flag.
        assert!(!alert.reason.contains("manual offline flag"));

        let mut low = state(0, "low");
        low.manual_offline = Some(true);
        let alert = evaluate_component(&low).unwrap();
        assert_eq!(alert.severity, Severity::Warning);
        assert!(!alert.auto_stop_recommended);
    }

    #[test]
    fn zero_thresholds_fall_back_to_defaults() {
        let mut component = state(3000, "high");
        component.heartbeat_timeout_ms = Some(0);
        component.threshold_ms = Some(0);
        assert!(evaluate_component(&component).is_none());
    }

    #[test]
    fn reason_lists_available_pieces_in_order() {
        let mut component = state(12_346, "medium");
        component.status = Some("running".into());
        component.manual_offline = Some(true);
        component.last_heartbeat = Some("ignored".into());
        component
            .metadata
            .insert(META_MANUAL_OFFLINE_REASON.into(), json!("maintenance"));
        component
            .metadata
            .insert(META_LAST_HEARTBEAT.into(), json!("2024-05-01T10:00:00Z"));

        let alert = evaluate_component(&component).unwrap();
        assert_eq!(
            alert.reason,
            "Heartbeat silent for 12.3s | last status 'running' | manual offline flag detected \
             | reason: maintenance | last heartbeat 2024-05-01T10:00:00Z"
        );
        assert_eq!(alert.gap_seconds, 12.35);
        assert_eq!(alert.metadata.len(), 2);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let component: OfflineComponentState = serde_json::from_value(json!({
            "componentId": "Press",
            "gapMs": 20000,
            "criticality": "high",
            "thresholdMs": 8000,
            "heartbeatTimeoutMs": 4000
        }))
        .unwrap();
        assert_eq!(component.threshold_ms, Some(8000));
        let response = evaluate(&[component]);
        assert_eq!(response.alerts.len(), 1);
        assert!(response.alerts[0].auto_stop_recommended);
    }
}
