//! Response body types shared by the issue handlers.
//!
//! Mutations answer with either an outcome (`{ "result", "_id" }`) or a
//! refusal (`{ "error", "_id"? }`), never with a bare status code.

use serde::Serialize;

/// `{ "result": "...", "_id": "..." }` for a successful update or delete.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: String,
}

/// `{ "error": "...", "_id": "..." }` for a refused issue operation.
///
/// `_id` is omitted when the request carried none.
#[derive(Debug, Serialize)]
pub struct IssueErrorResponse {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
