use std::sync::Arc;

use tracker_db::IssueStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Issue persistence, chosen at startup.
    pub store: Arc<dyn IssueStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
