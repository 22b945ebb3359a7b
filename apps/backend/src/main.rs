use std::env;

use actix_web::{web, App, HttpServer};
use coffee_backend::config::auth::security_config_from_env;
use coffee_backend::config::db::DbProfile;
use coffee_backend::infra::state::build_state;
use coffee_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use coffee_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });
    let run_migrations = env::var("RUN_MIGRATIONS_ON_START")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true);

    println!("🚀 Starting Coffee Shop backend on http://{host}:{port}");

    let security_config = match security_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    info!(issuer = %security_config.issuer, audience = %security_config.audience, "token verification configured");

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_migrations(run_migrations)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");

    let data = web::Data::new(app_state);
    let server_data = data.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .wrap(cors_middleware())
            .app_data(server_data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    if let Err(e) = data.close().await {
        error!(error = %e, "failed to close database pool");
    } else {
        info!("database pool closed");
    }

    result
}
