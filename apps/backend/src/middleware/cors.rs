use std::env;

use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::REQUEST_ID_HEADER;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:8100", "http://127.0.0.1:8100"];

/// CORS for the browser frontend.
///
/// Origins come from `CORS_ALLOWED_ORIGINS` (comma separated). Entries that
/// are empty, `null` or not http(s) are ignored; with nothing valid left the
/// local frontend dev-server origins are allowed.
pub fn cors_middleware() -> Cors {
    let configured = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let origins = if configured.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        configured
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

fn allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
