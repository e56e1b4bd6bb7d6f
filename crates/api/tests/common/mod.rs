//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`,
//! so no listener is bound. The router is cheap to clone and every clone
//! shares the same book store.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use librarian_api::config::{DocsSource, ServerConfig};
use librarian_api::docs::ApiDocs;
use librarian_api::router::build_app_router;
use librarian_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        docs: DocsSource::File {
            path: PathBuf::from("openapi.yaml"),
        },
    }
}

/// The full application router, serving the bundled OpenAPI document.
pub fn build_test_app() -> Router {
    build_test_app_with_docs(ApiDocs::bundled().unwrap())
}

pub fn build_test_app_with_docs(docs: ApiDocs) -> Router {
    build_app_router(AppState::new(test_config(), docs))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

/// POST an arbitrary body with an explicit content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}
