pub mod alerts;
pub mod anomaly;
pub mod maintenance;
pub mod models;
pub mod offline;
pub mod optimization;
pub mod parameter;

use mindtwin_core::telemetry::ComponentTelemetry;
use mindtwin_core::validation::validate_batch_not_empty;

use crate::error::AppResult;
use crate::state::AppState;

/// Use the caller's components, or pull recent ones from the backend when the
/// caller sent none. Fails with a validation error if both are empty.
pub(crate) async fn resolve_components(
    state: &AppState,
    supplied: Vec<ComponentTelemetry>,
    empty_message: &str,
) -> AppResult<Vec<ComponentTelemetry>> {
    let components = if supplied.is_empty() {
        tracing::debug!("No components supplied, fetching from telemetry backend");
        state.telemetry.fetch_recent_components(None).await
    } else {
        supplied
    };
    validate_batch_not_empty(&components, empty_message)?;
    Ok(components)
}
