//! Body extractor accepting either form-encoded or JSON payloads.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Decodes the request body as `T` based on its `Content-Type`:
///
/// - `application/json` is read as JSON.
/// - Any other declared type goes through axum's [`Form`] extractor.
/// - No content type: an empty body means "no fields", anything else is
///   read as JSON.
///
/// ```ignore
/// async fn handler(FormOrJson(input): FormOrJson<CreateIssue>) -> AppResult<Json<Issue>> {
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(Self(value))
            }
            Some(_) => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(Self(value))
            }
            None => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let body: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
                serde_json::from_slice(body)
                    .map(Self)
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            }
        }
    }
}
