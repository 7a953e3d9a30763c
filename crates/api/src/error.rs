use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracker_core::issue::IssueError;

use crate::response::IssueErrorResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`IssueError`] for refused issue operations and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A refused issue operation from `tracker_core`.
    #[error(transparent)]
    Issue(#[from] IssueError),

    /// A request body or query string that could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Refused operations are answered with 200 and the reason in the
            // body; clients switch on the `error` field.
            AppError::Issue(err) => {
                tracing::debug!(error = %err, id = ?err.id(), "Issue operation refused");
                let body = IssueErrorResponse {
                    error: err.to_string(),
                    id: err.id().map(str::to_string),
                };
                (StatusCode::OK, axum::Json(body)).into_response()
            }

            AppError::BadRequest(msg) => {
                let body = json!({
                    "error": msg,
                    "code": "BAD_REQUEST",
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
        }
    }
}
