/// Issue identifiers are UUID v7, so they sort in creation order.
pub type IssueId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered issue identifier.
pub fn new_issue_id() -> IssueId {
    uuid::Uuid::now_v7()
}

/// Parse a client-supplied identifier. Returns `None` for anything that is
/// not a UUID; callers treat that the same as an unknown id.
pub fn parse_issue_id(raw: &str) -> Option<IssueId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}
