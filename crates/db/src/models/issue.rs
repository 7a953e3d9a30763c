//! Issue entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::error::CoreError;
use tracker_core::fields::{bool_input, lenient_bool, non_blank, BoolInput};
use tracker_core::issue::{
    check_required, IssueError, FIELD_CREATED_BY, FIELD_ISSUE_TEXT, FIELD_ISSUE_TITLE,
};
use tracker_core::types::{parse_issue_id, IssueId, Timestamp};

/// A row from the `issues` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

/// An issue as it appears in a project listing. The project tag is omitted
/// because the caller already named it in the path.
#[derive(Debug, Clone, Serialize)]
pub struct IssueListing {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

impl From<Issue> for IssueListing {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id,
            issue_title: issue.issue_title,
            issue_text: issue.issue_text,
            created_by: issue.created_by,
            assigned_to: issue.assigned_to,
            status_text: issue.status_text,
            open: issue.open,
            created_on: issue.created_on,
            updated_on: issue.updated_on,
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Request body for creating an issue. Every field is optional at the wire
/// level so that missing required fields surface as a validation error
/// rather than a decoding failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateIssue {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

impl CreateIssue {
    /// Check required fields and apply defaults, producing the insert input
    /// for `project`.
    pub fn validate(self, project: &str) -> Result<NewIssue, IssueError> {
        check_required(&[
            (FIELD_ISSUE_TITLE, self.issue_title.as_deref()),
            (FIELD_ISSUE_TEXT, self.issue_text.as_deref()),
            (FIELD_CREATED_BY, self.created_by.as_deref()),
        ])?;

        Ok(NewIssue {
            project: project.to_string(),
            issue_title: self.issue_title.unwrap_or_default(),
            issue_text: self.issue_text.unwrap_or_default(),
            created_by: self.created_by.unwrap_or_default(),
            assigned_to: self.assigned_to.unwrap_or_default(),
            status_text: self.status_text.unwrap_or_default(),
        })
    }
}

/// Validated insert input. `open` and both timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Request body for updating an issue: the target `_id` plus any fields to merge.
///
/// Blank required fields count as not sent. Blank `assigned_to` and
/// `status_text` are real values and clear the stored text.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateIssue {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "bool_input")]
    pub open: Option<BoolInput>,
}

impl UpdateIssue {
    /// True when the body carries at least one field to merge, well-formed or not.
    pub fn has_update_fields(&self) -> bool {
        let sent = |v: &Option<String>| v.as_deref().is_some_and(|v| !v.trim().is_empty());

        sent(&self.issue_title)
            || sent(&self.issue_text)
            || sent(&self.created_by)
            || self.assigned_to.is_some()
            || self.status_text.is_some()
            || self.open.is_some()
    }

    /// Convert the fields to merge into a patch, failing on a value that
    /// cannot be stored.
    pub fn into_patch(self) -> Result<IssuePatch, CoreError> {
        let open = self.open.as_ref().map(BoolInput::to_bool).transpose()?;

        Ok(IssuePatch {
            issue_title: non_blank(self.issue_title),
            issue_text: non_blank(self.issue_text),
            created_by: non_blank(self.created_by),
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open,
        })
    }
}

/// Fields to merge into an existing issue. Only `Some` fields are applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IssuePatch {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssuePatch {
    /// Merge the patch into `issue` in place.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(v) = &self.issue_title {
            issue.issue_title.clone_from(v);
        }
        if let Some(v) = &self.issue_text {
            issue.issue_text.clone_from(v);
        }
        if let Some(v) = &self.created_by {
            issue.created_by.clone_from(v);
        }
        if let Some(v) = &self.assigned_to {
            issue.assigned_to.clone_from(v);
        }
        if let Some(v) = &self.status_text {
            issue.status_text.clone_from(v);
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Request body for deleting an issue.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteIssue {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Exact-match filters for listing a project's issues (`?field=value`).
///
/// Unknown query parameters are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IssueFilter {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub open: Option<bool>,
    pub created_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
}

/// How the `_id` filter constrains a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFilter {
    /// No `_id` filter was given.
    Any,
    Exact(IssueId),
    /// An `_id` was given but is not a valid identifier, so nothing matches.
    Unmatchable,
}

impl IssueFilter {
    pub fn id_filter(&self) -> IdFilter {
        match self.id.as_deref() {
            None => IdFilter::Any,
            Some(raw) => parse_issue_id(raw).map_or(IdFilter::Unmatchable, IdFilter::Exact),
        }
    }

    /// Whether `issue` satisfies every filter (project scoping is the caller's job).
    pub fn matches(&self, issue: &Issue) -> bool {
        let id_ok = match self.id_filter() {
            IdFilter::Any => true,
            IdFilter::Exact(id) => issue.id == id,
            IdFilter::Unmatchable => false,
        };

        id_ok
            && eq_if_set(&self.issue_title, &issue.issue_title)
            && eq_if_set(&self.issue_text, &issue.issue_text)
            && eq_if_set(&self.created_by, &issue.created_by)
            && eq_if_set(&self.assigned_to, &issue.assigned_to)
            && eq_if_set(&self.status_text, &issue.status_text)
            && eq_if_set(&self.open, &issue.open)
            && eq_if_set(&self.created_on, &issue.created_on)
            && eq_if_set(&self.updated_on, &issue.updated_on)
    }
}

fn eq_if_set<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
    wanted.as_ref().map_or(true, |w| w == actual)
}
