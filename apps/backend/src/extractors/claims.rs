use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::AuthClaims;
use crate::error::AppError;

/// Claims stored by [`RequirePermission`](crate::middleware::RequirePermission).
///
/// Only usable on routes wrapped by the gate; elsewhere the request carries no
/// claims and extraction fails with 401.
impl FromRequest for AuthClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthClaims>()
                .cloned()
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
