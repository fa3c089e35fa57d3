//! REST client for the backend `/api/telemetry` endpoint.
//!
//! Wraps the backend HTTP API using [`reqwest`] with a per-request timeout.

use std::time::Duration;

use mindtwin_core::fallback::positive_or;
use mindtwin_core::telemetry::ComponentTelemetry;
use serde::{Deserialize, Serialize};

/// Payload returned by the backend telemetry endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEnvelope {
    pub components: Vec<ComponentTelemetry>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Errors from the telemetry REST layer.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Telemetry API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the backend telemetry source.
#[derive(Debug, Clone)]
pub struct BackendDataClient {
    client: reqwest::Client,
    base_url: String,
    default_limit: u32,
}

impl BackendDataClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3000`).
    ///
    /// Trailing slashes are stripped so paths can be appended verbatim.
    pub fn new(
        base_url: &str,
        default_limit: u32,
        timeout: Duration,
    ) -> Result<Self, TelemetryClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, default_limit))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, default_limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_limit,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch recent component readings, failing soft.
    ///
    /// Any transport, status or decode error is logged and yields an empty
    /// list; the caller decides whether an empty batch is an error.
    pub async fn fetch_recent_components(&self, limit: Option<u32>) -> Vec<ComponentTelemetry> {
        match self.try_fetch_recent_components(limit).await {
            Ok(components) => {
                tracing::debug!(count = components.len(), "Fetched telemetry from backend");
                components
            }
            Err(e) => {
                tracing::warn!(error = %e, base_url = %self.base_url, "Telemetry fetch failed");
                Vec::new()
            }
        }
    }

    /// Fetch recent component readings, propagating errors.
    ///
    /// Sends `GET /api/telemetry?limit=N`; a missing or zero `limit` uses the
    /// client's default.
    pub async fn try_fetch_recent_components(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ComponentTelemetry>, TelemetryClientError> {
        let limit = positive_or(limit, self.default_limit);

        let response = self
            .client
            .get(format!("{}/api/telemetry", self.base_url))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TelemetryClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = response.json::<TelemetryEnvelope>().await?;
        Ok(envelope.components)
    }
}
