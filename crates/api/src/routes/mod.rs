pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/ai` route tree.
///
/// Route hierarchy:
///
/// ```text
/// GET  /models/status          -> models::model_status
/// POST /anomaly/detect         -> anomaly::detect_anomalies
/// POST /maintenance/predict    -> maintenance::predict_maintenance
/// POST /optimize               -> optimization::optimise
/// POST /offline/evaluate       -> offline::evaluate_offline
/// POST /parameter/evaluate     -> parameter::evaluate_parameters
/// POST /alerts/range           -> alerts::ingest_range_alert
/// GET  /alerts/range           -> alerts::list_range_alerts
/// ```
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/models/status", get(handlers::models::model_status))
        .route(
            "/anomaly/detect",
            post(handlers::anomaly::detect_anomalies),
        )
        .route(
            "/maintenance/predict",
            post(handlers::maintenance::predict_maintenance),
        )
        .route("/optimize", post(handlers::optimization::optimise))
        .route(
            "/offline/evaluate",
            post(handlers::offline::evaluate_offline),
        )
        .route(
            "/parameter/evaluate",
            post(handlers::parameter::evaluate_parameters),
        )
        .route(
            "/alerts/range",
            post(handlers::alerts::ingest_range_alert).get(handlers::alerts::list_range_alerts),
        )
}
