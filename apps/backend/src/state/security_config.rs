use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, Validation};

use crate::auth::jwks::JwksKeyStore;

/// Where token signatures are verified against.
#[derive(Clone)]
pub enum KeySource {
    /// Shared HMAC secret (HS256); local development and tests
    Secret(Vec<u8>),
    /// Issuer-published key set (RS256)
    Jwks(Arc<JwksKeyStore>),
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Secret(_) => f.write_str("Secret(<redacted>)"),
            KeySource::Jwks(store) => f.debug_tuple("Jwks").field(store).finish(),
        }
    }
}

/// Configuration for bearer-token verification
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Expected `iss`, e.g. `https://dev-coffee.auth0.com/`
    pub issuer: String,
    /// Expected `aud` (the API identifier)
    pub audience: String,
    pub keys: KeySource,
}

impl SecurityConfig {
    /// HS256 verification with a shared secret
    pub fn new(
        jwt_secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            keys: KeySource::Secret(jwt_secret.into()),
        }
    }

    /// RS256 verification against the issuer's key set
    pub fn with_jwks(
        store: JwksKeyStore,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            keys: KeySource::Jwks(Arc::new(store)),
        }
    }

    /// The only algorithm accepted; pinned by key source.
    pub fn algorithm(&self) -> Algorithm {
        match self.keys {
            KeySource::Secret(_) => Algorithm::HS256,
            KeySource::Jwks(_) => Algorithm::RS256,
        }
    }

    /// Validation rules: pinned algorithm, `exp`, issuer and audience.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(
            b"default_secret_for_tests_only".to_vec(),
            "https://coffee-shop.test/",
            "drinks",
        )
    }
}
