#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tracker_core::types::IssueId;
use tracker_db::models::issue::{Issue, IssueFilter, IssuePatch, NewIssue};
use tracker_db::StoreError;

use tracker_api::config::{LogFormat, ServerConfig, StoreBackend};
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_db::{IssueStore, MemoryIssueStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over `store`.
///
/// Uses the same `build_app_router` as `main.rs`, so integration tests
/// exercise the production middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app(store: Arc<dyn IssueStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).unwrap()
}

/// A fresh in-memory store, shared between the requests of one test.
pub fn memory_store() -> Arc<dyn IssueStore> {
    Arc::new(MemoryIssueStore::new())
}

/// A store whose backend is unreachable: every call fails.
pub struct FailingIssueStore;

fn unreachable_backend() -> StoreError {
    StoreError::Database(sqlx::Error::PoolClosed)
}

#[async_trait::async_trait]
impl IssueStore for FailingIssueStore {
    async fn find(&self, _project: &str, _filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        Err(unreachable_backend())
    }

    async fn insert(&self, _input: &NewIssue) -> Result<Issue, StoreError> {
        Err(unreachable_backend())
    }

    async fn update_by_id(&self, _id: IssueId, _patch: &IssuePatch) -> Result<bool, StoreError> {
        Err(unreachable_backend())
    }

    async fn delete_by_id(&self, _id: IssueId) -> Result<u64, StoreError> {
        Err(unreachable_backend())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unreachable_backend())
    }
}

pub fn failing_store() -> Arc<dyn IssueStore> {
    Arc::new(FailingIssueStore)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send `fields` as an `application/x-www-form-urlencoded` body.
pub async fn send_form(
    app: Router,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(encode_form(fields)))
        .unwrap();
    send(app, request).await
}

/// Send `body` as an `application/json` body.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal form encoder for the ASCII test values used in this suite.
fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "+".to_string(),
            c if c.is_ascii_alphanumeric() || "-_.*".contains(c) => c.to_string(),
            c => format!("%{:02X}", c as u32),
        })
        .collect()
}
