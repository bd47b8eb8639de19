use std::sync::Arc;

use japi_notify::NotificationPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: japi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Notification pipeline invoked after each quote submission.
    pub pipeline: Arc<NotificationPipeline>,
}
