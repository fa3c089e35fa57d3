//! Component telemetry records and typed metadata lookups.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Metadata;

/// Metadata key carrying the historical mean of a reading.
pub const META_HISTORY_MEAN: &str = "historyMean";
/// Metadata key carrying the historical standard deviation of a reading.
pub const META_HISTORY_STD: &str = "historyStd";
/// Metadata key carrying the ordered past values of a reading.
pub const META_HISTORY: &str = "history";

/// One component reading as pushed by the dashboard or fetched from the
/// telemetry backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTelemetry {
    pub name: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ComponentTelemetry {
    /// Build a bare reading with no metadata.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            component_type: None,
            value: Some(value),
            status: None,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry, builder style.
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Current reading, `0.0` when the record carries none.
    pub fn current_value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    /// Numeric metadata lookup. Non-numeric values count as absent.
    pub fn meta_number(&self, key: &str) -> Option<f64> {
        metadata_number(&self.metadata, key)
    }

    /// The `history` series as `(index, value)` pairs. Non-numeric entries
    /// are skipped but keep their slot, so later points retain their index.
    pub fn history(&self) -> Vec<(usize, f64)> {
        self.metadata
            .get(META_HISTORY)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.as_f64().map(|v| (i, v)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Read a numeric metadata entry.
pub fn metadata_number(metadata: &Metadata, key: &str) -> Option<f64> {
    metadata.get(key).and_then(Value::as_f64)
}

/// Read a metadata entry as display text.
///
/// Null, `false`, and empty strings are treated as absent.
pub fn metadata_text(metadata: &Metadata, key: &str) -> Option<String> {
    match metadata.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_type_alias_and_defaults() {
        let component: ComponentTelemetry = serde_json::from_value(json!({
            "name": "PumpA",
            "type": "pump",
            "value": 50.0
        }))
        .unwrap();

        assert_eq!(component.component_type.as_deref(), Some("pump"));
        assert!(component.metadata.is_empty());
        assert!(component.status.is_none());
    }

    #[test]
    fn missing_value_reads_as_zero() {
        let component: ComponentTelemetry =
            serde_json::from_value(json!({ "name": "Idle" })).unwrap();
        assert_eq!(component.value, None);
        assert_eq!(component.current_value(), 0.0);
    }

    #[test]
    fn non_numeric_metadata_is_absent() {
        let component = ComponentTelemetry::new("Belt", 1.0)
            .with_meta(META_HISTORY_MEAN, "forty")
            .with_meta(META_HISTORY_STD, 2);
        assert_eq!(component.meta_number(META_HISTORY_MEAN), None);
        assert_eq!(component.meta_number(META_HISTORY_STD), Some(2.0));
    }

    #[test]
    fn history_skips_non_numeric_entries_keeping_indices() {
        let component =
            ComponentTelemetry::new("Belt", 1.0).with_meta(META_HISTORY, json!([1, "x", 3.5]));
        assert_eq!(component.history(), vec![(0, 1.0), (2, 3.5)]);
    }

    #[test]
    fn metadata_text_treats_empty_as_absent() {
        let mut metadata = Metadata::new();
        metadata.insert("a".into(), json!(""));
        metadata.insert("b".into(), json!(false));
        metadata.insert("c".into(), json!("maintenance"));
        metadata.insert("d".into(), json!(12));
        assert_eq!(metadata_text(&metadata, "a"), None);
        assert_eq!(metadata_text(&metadata, "b"), None);
        assert_eq!(metadata_text(&metadata, "c").as_deref(), Some("maintenance"));
        assert_eq!(metadata_text(&metadata, "d").as_deref(), Some("12"));
        assert_eq!(metadata_text(&metadata, "missing"), None);
    }
}
