use std::env;
use std::time::Duration;

use super::db::must_var;
use crate::auth::jwks::JwksKeyStore;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

const DEFAULT_JWKS_TTL_SECS: u64 = 600;

/// Build the token verification settings from the environment.
///
/// - `API_AUDIENCE` is always required.
/// - With `AUTH_JWT_SECRET` set, tokens are HS256 and `AUTH_ISSUER` names the
///   expected issuer.
/// - Otherwise `AUTH0_DOMAIN` names the issuer and its JWKS is used (RS256).
///   `JWKS_CACHE_TTL_SECS` controls how long fetched keys are trusted.
pub fn security_config_from_env() -> Result<SecurityConfig, AppError> {
    let audience = must_var("API_AUDIENCE")?;

    if let Some(secret) = env::var("AUTH_JWT_SECRET").ok().filter(|s| !s.is_empty()) {
        let issuer = must_var("AUTH_ISSUER")?;
        return Ok(SecurityConfig::new(secret.into_bytes(), issuer, audience));
    }

    let issuer = issuer_from_domain(&must_var("AUTH0_DOMAIN")?)?;
    let ttl = match env::var("JWKS_CACHE_TTL_SECS") {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
            AppError::config(format!("JWKS_CACHE_TTL_SECS must be a number of seconds, got '{raw}'"))
        })?,
        Err(_) => DEFAULT_JWKS_TTL_SECS,
    };

    let store = JwksKeyStore::new(jwks_url(&issuer), Duration::from_secs(ttl))?;
    Ok(SecurityConfig::with_jwks(store, issuer, audience))
}

/// Normalise an Auth0 domain into the issuer string tokens carry.
///
/// Accepts `dev-coffee`, `dev-coffee.auth0.com`, `dev-coffee.eu.auth0.com`
/// or a full `https://.../` URL. A bare tenant prefix expands to
/// `<prefix>.auth0.com`.
pub fn issuer_from_domain(domain: &str) -> Result<String, AppError> {
    let host = domain
        .trim()
        .trim_start_matches("https://")
        .trim_end_matches('/');

    if host.is_empty() || host.contains('/') || host.starts_with("http://") {
        return Err(AppError::config(format!(
            "AUTH0_DOMAIN must be a host name or https URL, got '{domain}'"
        )));
    }

    if host.contains('.') {
        Ok(format!("https://{host}/"))
    } else {
        Ok(format!("https://{host}.auth0.com/"))
    }
}

/// Well-known JWKS location for an issuer ending in `/`.
pub fn jwks_url(issuer: &str) -> String {
    format!("{issuer}.well-known/jwks.json")
}
