//! Bearer-token verification and permission checks.

pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::{Audience, AuthClaims};
pub use jwks::JwksKeyStore;
pub use jwt::{mint_access_token, require_permission, verify_access_token};
