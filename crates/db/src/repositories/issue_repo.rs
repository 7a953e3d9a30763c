//! PostgreSQL-backed [`IssueStore`] over the `issues` table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracker_core::types::{new_issue_id, IssueId};

use crate::models::issue::{IdFilter, Issue, IssueFilter, IssuePatch, NewIssue};
use crate::store::{IssueStore, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project, issue_title, issue_text, created_by, \
    assigned_to, status_text, open, created_on, updated_on";

/// Provides the issue store operations against PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgIssueStore {
    pool: PgPool,
}

impl PgIssueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    /// List a project's issues with exact-match filters on any set field.
    ///
    /// Results are ordered oldest-first, which is insertion order.
    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let id = match filter.id_filter() {
            IdFilter::Unmatchable => return Ok(Vec::new()),
            IdFilter::Exact(id) => Some(id),
            IdFilter::Any => None,
        };

        let mut conditions: Vec<String> = vec!["project = $1".to_string()];
        let mut param_idx: usize = 2;

        let mut push = |column: &str, is_set: bool| {
            if is_set {
                conditions.push(format!("{column} = ${param_idx}"));
                param_idx += 1;
            }
        };
        push("id", id.is_some());
        push("issue_title", filter.issue_title.is_some());
        push("issue_text", filter.issue_text.is_some());
        push("created_by", filter.created_by.is_some());
        push("assigned_to", filter.assigned_to.is_some());
        push("status_text", filter.status_text.is_some());
        push("open", filter.open.is_some());
        push("created_on", filter.created_on.is_some());
        push("updated_on", filter.updated_on.is_some());

        let query = format!(
            "SELECT {COLUMNS} FROM issues WHERE {} ORDER BY created_on ASC, id ASC",
            conditions.join(" AND ")
        );
        tracing::trace!(project, %query, "Finding issues");

        // Bind order must match the placeholder order above.
        let mut q = sqlx::query_as::<_, Issue>(&query).bind(project);
        if let Some(id) = id {
            q = q.bind(id);
        }
        if let Some(v) = &filter.issue_title {
            q = q.bind(v);
        }
        if let Some(v) = &filter.issue_text {
            q = q.bind(v);
        }
        if let Some(v) = &filter.created_by {
            q = q.bind(v);
        }
        if let Some(v) = &filter.assigned_to {
            q = q.bind(v);
        }
        if let Some(v) = &filter.status_text {
            q = q.bind(v);
        }
        if let Some(v) = filter.open {
            q = q.bind(v);
        }
        if let Some(v) = filter.created_on {
            q = q.bind(v);
        }
        if let Some(v) = filter.updated_on {
            q = q.bind(v);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Insert a new issue, returning the full row.
    async fn insert(&self, input: &NewIssue) -> Result<Issue, StoreError> {
        let query = format!(
            "INSERT INTO issues \
                (id, project, issue_title, issue_text, created_by, assigned_to, status_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let issue = sqlx::query_as::<_, Issue>(&query)
            .bind(new_issue_id())
            .bind(&input.project)
            .bind(&input.issue_title)
            .bind(&input.issue_text)
            .bind(&input.created_by)
            .bind(&input.assigned_to)
            .bind(&input.status_text)
            .fetch_one(&self.pool)
            .await?;
        Ok(issue)
    }

    /// Update an issue. Only non-`None` fields in `patch` are applied.
    async fn update_by_id(&self, id: IssueId, patch: &IssuePatch) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE issues SET
                issue_title = COALESCE($2, issue_title),
                issue_text = COALESCE($3, issue_text),
                created_by = COALESCE($4, created_by),
                assigned_to = COALESCE($5, assigned_to),
                status_text = COALESCE($6, status_text),
                open = COALESCE($7, open),
                updated_on = GREATEST(NOW(), created_on)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&patch.issue_title)
        .bind(&patch.issue_text)
        .bind(&patch.created_by)
        .bind(&patch.assigned_to)
        .bind(&patch.status_text)
        .bind(patch.open)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an issue by ID.
    async fn delete_by_id(&self, id: IssueId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
