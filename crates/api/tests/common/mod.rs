#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use fest_api::config::{RegistryBackend, ServerConfig};
use fest_api::router::build_app_router;
use fest_api::state::AppState;
use fest_db::registry::{MemoryRegistry, Registry};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        registry_backend: RegistryBackend::Memory,
        code_issue_max_attempts: 5,
    }
}

/// Fresh seeded in-memory registry.
pub fn test_registry() -> Arc<dyn Registry> {
    Arc::new(MemoryRegistry::seeded())
}

/// Build the full application router over `registry`.
///
/// The router is cheap to clone and every clone shares the same registry,
/// so a test can send several requests against one data set.
pub fn build_test_app(registry: Arc<dyn Registry>) -> Router {
    let config = test_config();
    let state = AppState::new(registry, config.clone());
    build_app_router(state, &config)
}

/// Router over a fresh seeded registry.
pub fn seeded_app() -> Router {
    build_test_app(test_registry())
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Issue a code through the API and return it.
pub async fn issue_code(app: &Router, full_name: &str, team_id: i64) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/participants",
        serde_json::json!({"full_name": full_name, "team_id": team_id}),
    )
    .await;
    assert_eq!(response.status(), 201, "issuing a code for {full_name}");
    body_json(response).await["data"]["unique_code"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register `code` for `program_ids` through the API.
pub async fn register(app: &Router, code: &str, program_ids: &[i64]) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/registrations",
        serde_json::json!({"unique_code": code, "program_ids": program_ids}),
    )
    .await;
    assert_eq!(response.status(), 200, "registering {code}");
    body_json(response).await
}
