// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use wechat_cover_server::{
    fetch::{FetchSettings, ReqwestFetcher},
    handlers,
    state::AppState,
};

/// Fetch settings with short timeouts so slow-response tests finish quickly.
pub fn test_settings() -> FetchSettings {
    FetchSettings {
        article_timeout: Duration::from_millis(500),
        image_timeout: Duration::from_millis(500),
        ..FetchSettings::default()
    }
}

/// Build the API router wired to a real reqwest fetcher.
pub fn create_test_app(settings: FetchSettings) -> Router {
    let fetcher = ReqwestFetcher::new(settings).expect("client builds");
    let state = AppState {
        fetcher: Arc::new(fetcher),
    };
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/parse", post(handlers::parse::parse_article_cover))
        .route("/api/docs.json", get(handlers::docs::api_docs_json))
        .with_state(state)
}

/// An article URL served by `server` that still carries the WeChat host
/// marker, so it passes domain validation.
pub fn article_url(server: &MockServer, slug: &str) -> String {
    format!("{}/mp.weixin.qq.com/s/{slug}", server.uri())
}

pub fn article_path(slug: &str) -> String {
    format!("/mp.weixin.qq.com/s/{slug}")
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, req).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
