use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Open a connection pool for `profile` as `owner`. Runs no migrations.
///
/// An in-memory database lives inside a single connection, so that profile
/// is capped at one pooled connection.
pub async fn connect_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;

    let mut opts = ConnectOptions::new(database_url);
    opts.connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if profile == DbProfile::InMemory {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    info!(profile = ?profile, owner = ?owner, "database connected");
    Ok(conn)
}

/// Open the application pool for `profile`, applying pending migrations
/// first when `run_migrations` is set.
///
/// Migrations run on a short-lived owner connection that is closed before the
/// app-credential pool is opened. The in-memory profile has no separate owner
/// and is migrated on the pool it returns.
pub async fn bootstrap_db(
    profile: DbProfile,
    run_migrations: bool,
) -> Result<DatabaseConnection, AppError> {
    if profile == DbProfile::InMemory {
        let conn = connect_db(profile, DbOwner::App).await?;
        if run_migrations {
            migrate(&conn, MigrationCommand::Up).await?;
            info!("migrations applied");
        }
        return Ok(conn);
    }

    if run_migrations {
        let admin = connect_db(profile, DbOwner::Owner).await?;
        migrate(&admin, MigrationCommand::Up).await?;
        admin.close().await?;
        info!(profile = ?profile, "migrations applied with owner credentials");
    }

    connect_db(profile, DbOwner::App).await
}
