//! Drink routes.
//!
//! `GET /drinks` is public. Every other route sits behind a
//! [`RequirePermission`] gate naming the permission it needs; the gate answers
//! 401/403 before the handler (or its extractors) run.

use actix_web::{guard, web, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::claims::AuthClaims;
use crate::domain::drink::{title_from_update, DrinkLong, DrinkShort, NewDrink};
use crate::error::AppError;
use crate::extractors::{DrinkId, ValidatedJson};
use crate::middleware::RequirePermission;
use crate::repos::drinks;
use crate::state::app_state::AppState;

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

#[derive(Debug, Serialize)]
struct DrinksResponse<T> {
    success: bool,
    drinks: T,
}

impl<T: Serialize> DrinksResponse<T> {
    fn ok(drinks: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            drinks,
        })
    }
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    delete: i32,
}

/// GET /drinks
///
/// All drinks in the short projection (ingredient colours only).
async fn list_drinks(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let drinks: Vec<DrinkShort> = drinks::list_all(app_state.db())
        .await?
        .iter()
        .map(|d| d.short())
        .collect();

    Ok(DrinksResponse::ok(drinks))
}

/// GET /drinks-detail (`get:drinks-detail`)
async fn list_drinks_detail(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let drinks: Vec<DrinkLong> = drinks::list_all(app_state.db())
        .await?
        .iter()
        .map(|d| d.long())
        .collect();

    Ok(DrinksResponse::ok(drinks))
}

/// POST /drinks (`post:drinks`)
///
/// Body: `{"title": string, "recipe": [ingredient] | ingredient}`.
/// Responds with the new drink in the long projection. Invalid input and
/// failed writes are both 422.
async fn create_drink(
    app_state: web::Data<AppState>,
    claims: AuthClaims,
    body: ValidatedJson<Value>,
) -> Result<HttpResponse, AppError> {
    let new_drink = NewDrink::from_body(&body)?;

    let drink = drinks::create(app_state.db(), &new_drink)
        .await
        .map_err(AppError::db_as_unprocessable)?;

    info!(drink_id = drink.id, sub = %claims.sub, "drink created");
    Ok(DrinksResponse::ok(drink.long()))
}

/// PATCH /drinks/{drink_id} (`patch:drinks`)
///
/// Retitles a drink. Only `title` is read from the body; it must be a
/// non-empty string or the request is rejected with 400 and nothing changes.
async fn update_drink(
    app_state: web::Data<AppState>,
    claims: AuthClaims,
    drink_id: DrinkId,
    body: ValidatedJson<Value>,
) -> Result<HttpResponse, AppError> {
    let id = drink_id.0;
    let db = app_state.db();

    let existing = drinks::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("drink {id} not found")))?;

    let title = title_from_update(&body)?;

    let drink = drinks::update_title(db, existing, &title)
        .await
        .map_err(AppError::db_as_unprocessable)?
        .ok_or_else(|| AppError::not_found(format!("drink {id} not found")))?;

    info!(drink_id = id, sub = %claims.sub, "drink retitled");
    Ok(DrinksResponse::ok(vec![drink.long()]))
}

/// DELETE /drinks/{drink_id} (`delete:drinks`)
async fn delete_drink(
    app_state: web::Data<AppState>,
    claims: AuthClaims,
    drink_id: DrinkId,
) -> Result<HttpResponse, AppError> {
    let id = drink_id.0;
    let db = app_state.db();

    if drinks::find_by_id(db, id).await?.is_none() {
        return Err(AppError::not_found(format!("drink {id} not found")));
    }

    if !drinks::delete(db, id).await? {
        return Err(AppError::not_found(format!("drink {id} not found")));
    }

    info!(drink_id = id, sub = %claims.sub, "drink deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        delete: id,
    }))
}

/// Register the drink routes. Resources sharing a path are split by method
/// guard so each method can carry its own gate.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/drinks")
            .guard(guard::Get())
            .route(web::get().to(list_drinks)),
    )
    .service(
        web::resource("/drinks")
            .guard(guard::Post())
            .wrap(RequirePermission::new(POST_DRINKS))
            .route(web::post().to(create_drink)),
    )
    .service(
        web::resource("/drinks-detail")
            .guard(guard::Get())
            .wrap(RequirePermission::new(GET_DRINKS_DETAIL))
            .route(web::get().to(list_drinks_detail)),
    )
    .service(
        web::resource("/drinks/{drink_id}")
            .guard(guard::Patch())
            .wrap(RequirePermission::new(PATCH_DRINKS))
            .route(web::patch().to(update_drink)),
    )
    .service(
        web::resource("/drinks/{drink_id}")
            .guard(guard::Delete())
            .wrap(RequirePermission::new(DELETE_DRINKS))
            .route(web::delete().to(delete_drink)),
    );
}
