#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use mindtwin_api::config::ServerConfig;
use mindtwin_api::router::build_app_router;
use mindtwin_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The telemetry backend points at a port nothing listens on, so the
/// fallback fetch always comes back empty unless a test overrides it.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        backend_base_url: "http://127.0.0.1:9".to_string(),
        telemetry_timeout_secs: 1,
        ..ServerConfig::default()
    }
}

/// Build the full application router (same middleware stack as production)
/// from the given configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::from_config(config).expect("telemetry client should build");
    build_app_router(state)
}

/// Build the full application router using [`test_config`].
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
