use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header};
use tracing::debug;

use crate::auth::claims::{AuthClaims, TokenClaims};
use crate::error::AppError;
use crate::state::security_config::{KeySource, SecurityConfig};

/// Mint a token signed with the shared secret.
///
/// Only meaningful for [`KeySource::Secret`]; issuer-signed tokens come from
/// the identity provider, never from this service.
pub fn mint_access_token(claims: &AuthClaims, security: &SecurityConfig) -> Result<String, AppError> {
    let KeySource::Secret(secret) = &security.keys else {
        return Err(AppError::internal(
            "cannot mint tokens when verifying against an issuer key set",
        ));
    };

    encode(
        &Header::new(security.algorithm()),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a bearer token and return its claims.
///
/// Errors:
/// - undecodable token, wrong algorithm, unknown `kid`, bad signature →
///   `UnauthorizedInvalidJwt`
/// - expired → `UnauthorizedExpiredJwt`
/// - wrong issuer/audience, unparseable payload, no `permissions` →
///   `UnauthorizedInvalidClaims`
/// - issuer key set unreachable → `Internal`
pub async fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AuthClaims, AppError> {
    let header = decode_header(token).map_err(|e| {
        debug!(error = %e, "token header did not decode");
        AppError::unauthorized_invalid_jwt()
    })?;

    if header.alg != security.algorithm() {
        debug!(alg = ?header.alg, "token signed with unexpected algorithm");
        return Err(AppError::unauthorized_invalid_jwt());
    }

    let key = match &security.keys {
        KeySource::Secret(secret) => DecodingKey::from_secret(secret),
        KeySource::Jwks(store) => {
            let kid = header.kid.as_deref().ok_or_else(|| {
                debug!("token header has no kid");
                AppError::unauthorized_invalid_jwt()
            })?;
            store.get_key(kid).await?
        }
    };

    let data = decode::<TokenClaims>(token, &key, &security.validation())
        .map_err(|e| classify_decode_error(e.kind()))?;

    AuthClaims::try_from(data.claims)
}

fn classify_decode_error(kind: &ErrorKind) -> AppError {
    match kind {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        ErrorKind::InvalidIssuer => AppError::unauthorized_invalid_claims("unexpected issuer"),
        ErrorKind::InvalidAudience => AppError::unauthorized_invalid_claims("unexpected audience"),
        ErrorKind::ImmatureSignature => AppError::unauthorized_invalid_claims("token not yet valid"),
        ErrorKind::MissingRequiredClaim(claim) => {
            AppError::unauthorized_invalid_claims(format!("missing required claim '{claim}'"))
        }
        ErrorKind::Json(e) => {
            AppError::unauthorized_invalid_claims(format!("claims did not parse: {e}"))
        }
        _ => AppError::unauthorized_invalid_jwt(),
    }
}

/// Gate check: the claims must grant `permission`.
pub fn require_permission(claims: &AuthClaims, permission: &str) -> Result<(), AppError> {
    if claims.has_permission(permission) {
        Ok(())
    } else {
        Err(AppError::forbidden(permission))
    }
}
