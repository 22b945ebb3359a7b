use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for [`AppState`], shared by `main` and the tests.
///
/// Defaults to a private in-memory database with migrations applied and the
/// test security settings.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
    run_migrations: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: DbProfile::InMemory,
            run_migrations: true,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = bootstrap_db(self.db_profile, self.run_migrations).await?;
        Ok(AppState::new(conn, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
