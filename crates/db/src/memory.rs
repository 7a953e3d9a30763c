//! In-memory [`IssueStore`] backed by a `Vec` behind an async `RwLock`.
//!
//! Records are kept in insertion order. Nothing survives a restart, so this
//! backend is meant for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracker_core::types::{new_issue_id, IssueId};

use crate::models::issue::{Issue, IssueFilter, IssuePatch, NewIssue};
use crate::store::{IssueStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<Vec<Issue>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored issues across all projects.
    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let issues = self.issues.read().await;
        Ok(issues
            .iter()
            .filter(|issue| issue.project == project && filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn insert(&self, input: &NewIssue) -> Result<Issue, StoreError> {
        let now = Utc::now();
        let issue = Issue {
            id: new_issue_id(),
            project: input.project.clone(),
            issue_title: input.issue_title.clone(),
            issue_text: input.issue_text.clone(),
            created_by: input.created_by.clone(),
            assigned_to: input.assigned_to.clone(),
            status_text: input.status_text.clone(),
            open: true,
            created_on: now,
            updated_on: now,
        };
        self.issues.write().await.push(issue.clone());
        Ok(issue)
    }

    async fn update_by_id(&self, id: IssueId, patch: &IssuePatch) -> Result<bool, StoreError> {
        let mut issues = self.issues.write().await;
        let Some(issue) = issues.iter_mut().find(|issue| issue.id == id) else {
            return Ok(false);
        };
        patch.apply_to(issue);
        issue.updated_on = Utc::now().max(issue.created_on);
        Ok(true)
    }

    async fn delete_by_id(&self, id: IssueId) -> Result<u64, StoreError> {
        let mut issues = self.issues.write().await;
        let before = issues.len();
        issues.retain(|issue| issue.id != id);
        Ok((before - issues.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
