//! The document-store contract the HTTP layer is written against.
//!
//! Handlers hold an `Arc<dyn IssueStore>` so the backing store (PostgreSQL in
//! production, memory in tests and local runs) is chosen at startup.

use async_trait::async_trait;
use tracker_core::types::IssueId;

use crate::models::issue::{Issue, IssueFilter, IssuePatch, NewIssue};

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for issue records with exact-match filtering and id-based
/// mutation. Each call is atomic for the single record it touches.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Issues of `project` matching every set filter, in insertion order.
    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Persist a new issue, assigning its id, `open = true`, and both timestamps.
    async fn insert(&self, input: &NewIssue) -> Result<Issue, StoreError>;

    /// Merge `patch` into the issue with `id` and refresh `updated_on`.
    ///
    /// Returns `false` if no issue has that id.
    async fn update_by_id(&self, id: IssueId, patch: &IssuePatch) -> Result<bool, StoreError>;

    /// Permanently remove the issue with `id`. Returns the number of records removed.
    async fn delete_by_id(&self, id: IssueId) -> Result<u64, StoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
