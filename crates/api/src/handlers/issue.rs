//! Handlers for a project's issue collection (`/api/issues/{project}`).
//!
//! Every refusal is returned as an [`IssueError`], which renders as a 200
//! response carrying `{ "error": ... }`. Store failures are logged and folded
//! into the closest refusal. A body or query that does not decode is treated
//! as carrying no fields.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use tracker_core::issue::{require_id, IssueError, RESULT_DELETED, RESULT_UPDATED};
use tracker_core::types::parse_issue_id;
use tracker_db::models::issue::{
    CreateIssue, DeleteIssue, Issue, IssueFilter, IssueListing, UpdateIssue,
};

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::response::OutcomeResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /issues/{project}
// ---------------------------------------------------------------------------

/// List a project's issues, filtered by exact match on any query field.
pub async fn list(
    State(state): State<AppState>,
    Path(project): Path<String>,
    filter: Result<Query<IssueFilter>, QueryRejection>,
) -> AppResult<Json<Vec<IssueListing>>> {
    let filter = match filter {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            tracing::debug!(
                error = %rejection.body_text(),
                project = %project,
                "Issue filter value cannot match, listing nothing"
            );
            return Ok(Json(Vec::new()));
        }
    };

    let issues = match state.store.find(&project, &filter).await {
        Ok(issues) => issues,
        Err(err) => {
            tracing::error!(error = %err, project = %project, "Failed to list issues");
            Vec::new()
        }
    };

    tracing::debug!(project = %project, count = issues.len(), "Listed issues");

    Ok(Json(issues.into_iter().map(IssueListing::from).collect()))
}

// ---------------------------------------------------------------------------
// POST /issues/{project}
// ---------------------------------------------------------------------------

/// Create an issue in the project, returning the full stored record.
pub async fn create(
    State(state): State<AppState>,
    Path(project): Path<String>,
    body: Result<FormOrJson<CreateIssue>, AppError>,
) -> AppResult<Json<Issue>> {
    let new_issue = body_or_default(body).validate(&project)?;

    let issue = state.store.insert(&new_issue).await.map_err(|err| {
        tracing::error!(
            error = %err,
            project = %project,
            "Issue store failed on insert, refusing as required field(s) missing"
        );
        IssueError::RequiredFieldsMissing { missing: Vec::new() }
    })?;

    tracing::info!(issue_id = %issue.id, project = %project, "Issue created");

    Ok(Json(issue))
}

// ---------------------------------------------------------------------------
// PUT /issues/{project}
// ---------------------------------------------------------------------------

/// Merge the supplied fields into the issue named by `_id`.
///
/// Refusals, in order: no `_id`, nothing to merge, then any store failure
/// (including a value that cannot be stored and an id that is malformed or
/// matches nothing). The project in the path does not scope the update.
pub async fn update(
    State(state): State<AppState>,
    Path(project): Path<String>,
    body: Result<FormOrJson<UpdateIssue>, AppError>,
) -> AppResult<Json<OutcomeResponse>> {
    let input = body_or_default(body);
    let id = require_id(input.id.as_deref())?;

    if !input.has_update_fields() {
        return Err(IssueError::NoUpdateFields { id }.into());
    }

    let patch = match input.into_patch() {
        Ok(patch) => patch,
        Err(err) => {
            tracing::debug!(error = %err, id = %id, "Update value cannot be stored");
            return Err(IssueError::UpdateFailed { id }.into());
        }
    };

    let Some(issue_id) = parse_issue_id(&id) else {
        return Err(IssueError::UpdateFailed { id }.into());
    };

    match state.store.update_by_id(issue_id, &patch).await {
        Ok(true) => {
            tracing::info!(issue_id = %issue_id, project = %project, "Issue updated");
            Ok(Json(OutcomeResponse {
                result: RESULT_UPDATED,
                id,
            }))
        }
        Ok(false) => Err(IssueError::UpdateFailed { id }.into()),
        Err(err) => {
            tracing::error!(error = %err, issue_id = %issue_id, "Failed to update issue");
            Err(IssueError::UpdateFailed { id }.into())
        }
    }
}

// ---------------------------------------------------------------------------
// DELETE /issues/{project}
// ---------------------------------------------------------------------------

/// Permanently delete the issue named by `_id`.
pub async fn delete(
    State(state): State<AppState>,
    Path(project): Path<String>,
    body: Result<FormOrJson<DeleteIssue>, AppError>,
) -> AppResult<Json<OutcomeResponse>> {
    let input = body_or_default(body);
    let id = require_id(input.id.as_deref())?;

    let Some(issue_id) = parse_issue_id(&id) else {
        return Err(IssueError::DeleteFailed { id }.into());
    };

    match state.store.delete_by_id(issue_id).await {
        Ok(0) => Err(IssueError::DeleteFailed { id }.into()),
        Ok(_) => {
            tracing::info!(issue_id = %issue_id, project = %project, "Issue deleted");
            Ok(Json(OutcomeResponse {
                result: RESULT_DELETED,
                id,
            }))
        }
        Err(err) => {
            tracing::error!(error = %err, issue_id = %issue_id, "Failed to delete issue");
            Err(IssueError::DeleteFailed { id }.into())
        }
    }
}

/// Unwrap a decoded body, or fall back to an empty one when decoding failed.
fn body_or_default<T: Default>(body: Result<FormOrJson<T>, AppError>) -> T {
    match body {
        Ok(FormOrJson(input)) => input,
        Err(err) => {
            tracing::debug!(error = %err, "Undecodable request body, treating as empty");
            T::default()
        }
    }
}
