#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;

pub use auth::{mint_access_token, require_permission, verify_access_token, AuthClaims};
pub use config::auth::security_config_from_env;
pub use config::db::{db_url, DbOwner, DbProfile};
pub use error::{AppError, ErrorBody};
pub use errors::ErrorCode;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{
    cors_middleware, RequestTrace, RequirePermission, StructuredLogger, TraceSpan,
};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    coffee_test_support::logging::init();
}
