//! Permission gate middleware
//!
//! Registered per route with the permission that route requires:
//!
//! ```ignore
//! web::resource("/drinks-detail")
//!     .wrap(RequirePermission::new("get:drinks-detail"))
//!     .route(web::get().to(list_drinks_detail))
//! ```
//!
//! The gate extracts the bearer token, verifies it, checks the permission and
//! stores the [`AuthClaims`] in request extensions before the handler runs.
//! Failures are rendered as error responses here, so the handler (and its
//! extractors) never run for an unauthorized request.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::jwt::{require_permission, verify_access_token};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct RequirePermission {
    permission: Rc<str>,
}

impl RequirePermission {
    pub fn new(permission: &str) -> Self {
        Self {
            permission: Rc::from(permission),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            permission: Rc::clone(&self.permission),
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    permission: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permission = Rc::clone(&self.permission);

        Box::pin(async move {
            match authorize(&req, &permission).await {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(err) => {
                    warn!(
                        permission = %permission,
                        path = %req.path(),
                        reason = %err,
                        "authorization failed"
                    );
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

/// unauthenticated → token-parsed → signature-verified → claims-checked → authorized
async fn authorize(req: &ServiceRequest, permission: &str) -> Result<(), AppError> {
    let token = extract_bearer_from_header(req.headers().get(header::AUTHORIZATION))?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_access_token(&token, &app_state.security).await?;
    require_permission(&claims, permission)?;

    req.extensions_mut().insert(claims);
    Ok(())
}

fn extract_bearer_from_header(header_value: Option<&HeaderValue>) -> Result<String, AppError> {
    let auth_str = header_value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("Bearer") {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(parts[1].to_string())
}
