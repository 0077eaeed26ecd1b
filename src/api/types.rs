//! Shared state for the portal API.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::db::sqlite::open_database;

/// Shared context for all API routes. Connections are opened per request.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Open a database connection for the current request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        open_database(&self.db_path).map_err(ApiError::from)
    }
}
