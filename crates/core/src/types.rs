/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Open key/value metadata attached to components, evaluations and alerts.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
