//! Request handlers.
//!
//! Handlers delegate to the [`IssueStore`](tracker_db::IssueStore) held in
//! [`AppState`](crate::state::AppState) and map refusals via
//! [`AppError`](crate::error::AppError).

pub mod issue;
