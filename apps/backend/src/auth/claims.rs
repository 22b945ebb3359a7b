//! Claims carried by verified access tokens.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `aud` may be a single string or a list (Auth0 adds its userinfo audience).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Verified claims, inserted into request extensions by the permission gate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthClaims {
    /// Subject (user or client identifier at the issuer)
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Permission strings granted by the issuer's RBAC, e.g. `post:drinks`
    pub permissions: Vec<String>,
}

impl AuthClaims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Wire shape of the token payload. `permissions` is optional here so a token
/// without it is reported as malformed claims rather than a decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenClaims {
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl TryFrom<TokenClaims> for AuthClaims {
    type Error = AppError;

    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        let permissions = claims
            .permissions
            .ok_or_else(|| AppError::unauthorized_invalid_claims("permissions not included in token"))?;

        Ok(AuthClaims {
            sub: claims.sub,
            iss: claims.iss,
            aud: claims.aud,
            exp: claims.exp,
            iat: claims.iat,
            permissions,
        })
    }
}
