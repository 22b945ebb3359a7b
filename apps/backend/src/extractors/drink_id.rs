use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Drink identity taken from the `{drink_id}` path segment.
///
/// Anything that is not a positive integer cannot name a stored drink and is
/// reported as not found. Existence is checked by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i32);

impl FromRequest for DrinkId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_drink_id(req.match_info().get("drink_id")))
    }
}

fn parse_drink_id(raw: Option<&str>) -> Result<DrinkId, AppError> {
    let raw = raw.ok_or_else(|| AppError::not_found("missing drink_id path segment"))?;

    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(DrinkId(id)),
        _ => Err(AppError::not_found(format!("no drink with id '{raw}'"))),
    }
}
