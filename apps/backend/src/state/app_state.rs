use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::error::AppError;

/// Application state containing shared resources.
///
/// Built once at startup and handed to every handler through `web::Data`.
/// The connection pool lives exactly as long as the process; call
/// [`AppState::close`] after the server stops.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Security configuration for bearer-token verification
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { db, security }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the connection pool. Clones of this state share the pool, so
    /// every clone is unusable for storage afterwards.
    pub async fn close(&self) -> Result<(), AppError> {
        self.db.clone().close().await.map_err(AppError::from)
    }
}
