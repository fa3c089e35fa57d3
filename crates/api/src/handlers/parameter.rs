//! Handler for parameter-deviation forecasting.

use axum::Json;
use mindtwin_core::parameter::{evaluate, ParameterEvaluation, ParameterEvaluationResponse};
use mindtwin_core::validation::validate_batch_not_empty;
use serde::Deserialize;

use crate::error::AppResult;

/// Request body for `POST /ai/parameter/evaluate`.
#[derive(Debug, Deserialize)]
pub struct ParameterEvaluationRequest {
    #[serde(default)]
    pub evaluations: Vec<ParameterEvaluation>,
}

/// POST /ai/parameter/evaluate
///
/// Forecast wear and throughput impact of out-of-range parameter proposals.
pub async fn evaluate_parameters(
    Json(input): Json<ParameterEvaluationRequest>,
) -> AppResult<Json<ParameterEvaluationResponse>> {
    validate_batch_not_empty(&input.evaluations, "No parameter evaluations provided")?;

    let response = evaluate(&input.evaluations);
    tracing::info!(
        evaluations = input.evaluations.len(),
        warnings = response.warnings.len(),
        "Parameter evaluation completed"
    );
    Ok(Json(response))
}
