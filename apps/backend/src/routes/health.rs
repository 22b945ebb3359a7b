use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    migrations: String,
    time: String,
}

/// GET /health
///
/// Always 200 while the process is serving; `db` reports whether a trivial
/// query succeeds and `migrations` names the latest applied migration.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let db = app_state.db();
    let ping = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS health_check".to_string(),
        ))
        .await;

    let (db_status, migrations) = match ping {
        Ok(_) => {
            let migrations = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok", migrations)
        }
        Err(e) => {
            warn!(error = %e, "health check query failed");
            ("error", "unknown".to_string())
        }
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_status,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
