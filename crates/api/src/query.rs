//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Optional `?limit=` parameter for listing endpoints.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
