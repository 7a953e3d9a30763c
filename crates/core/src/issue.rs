//! Issue field names, outcome messages, and the validation rules applied
//! before any store call.

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_ISSUE_TITLE: &str = "issue_title";
pub const FIELD_ISSUE_TEXT: &str = "issue_text";
pub const FIELD_CREATED_BY: &str = "created_by";

// ---------------------------------------------------------------------------
// Outcome messages
// ---------------------------------------------------------------------------

pub const RESULT_UPDATED: &str = "successfully updated";
pub const RESULT_DELETED: &str = "successfully deleted";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every way an issue operation can be refused.
///
/// The `Display` text of each variant is the exact message clients see in the
/// `error` field of the response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueError {
    /// One or more of the required creation fields was absent or blank.
    #[error("required field(s) missing")]
    RequiredFieldsMissing { missing: Vec<&'static str> },

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    /// The store rejected the update or no record had this id.
    #[error("could not update")]
    UpdateFailed { id: String },

    /// The store rejected the delete or removed nothing.
    #[error("could not delete")]
    DeleteFailed { id: String },
}

impl IssueError {
    /// The client-supplied id echoed back alongside the error, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::RequiredFieldsMissing { .. } | IssueError::MissingId => None,
            IssueError::NoUpdateFields { id }
            | IssueError::UpdateFailed { id }
            | IssueError::DeleteFailed { id } => Some(id),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that every named field holds a non-blank value.
///
/// Reports all missing fields at once so they can be logged together.
pub fn check_required(fields: &[(&'static str, Option<&str>)]) -> Result<(), IssueError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IssueError::RequiredFieldsMissing { missing })
    }
}

/// Extract the `_id` a mutation targets, rejecting absent or blank ids.
pub fn require_id(raw: Option<&str>) -> Result<String, IssueError> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(IssueError::MissingId),
    }
}
