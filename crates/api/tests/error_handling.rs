//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code and body. They do NOT need an HTTP server -- they call
//! `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use tracker_api::error::AppError;
use tracker_core::issue::IssueError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: refused issue operations answer 200 with the reason in the body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn required_fields_missing_has_no_id() {
    let err = AppError::from(IssueError::RequiredFieldsMissing {
        missing: vec!["created_by"],
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "error": "required field(s) missing" }));
}

#[tokio::test]
async fn missing_id_has_no_id() {
    let (status, json) = error_to_response(IssueError::MissingId.into()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "error": "missing _id" }));
}

#[tokio::test]
async fn id_bearing_refusals_echo_the_id() {
    let cases = [
        (
            IssueError::NoUpdateFields { id: "a1".into() },
            "no update field(s) sent",
        ),
        (
            IssueError::UpdateFailed { id: "a1".into() },
            "could not update",
        ),
        (
            IssueError::DeleteFailed { id: "a1".into() },
            "could not delete",
        ),
    ];

    for (err, message) in cases {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "error": message, "_id": "a1" }));
    }
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}
