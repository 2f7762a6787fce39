use std::sync::Arc;

use roster_db::store::EmployeeStore;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store, opened at start-up and closed after shutdown.
    pub store: Arc<dyn EmployeeStore>,
    /// Upload directory for employee attachments.
    pub uploads: Arc<UploadStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
