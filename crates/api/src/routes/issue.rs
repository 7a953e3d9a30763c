//! Route definitions for the `/issues` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::issue;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// GET    /{project}    -> list
/// POST   /{project}    -> create
/// PUT    /{project}    -> update
/// DELETE /{project}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{project}",
        get(issue::list)
            .post(issue::create)
            .put(issue::update)
            .delete(issue::delete),
    )
}
