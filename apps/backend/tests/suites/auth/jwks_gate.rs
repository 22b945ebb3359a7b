use actix_web::http::StatusCode;
use actix_web::test;
use coffee_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::common::json_body;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{claims_with, mint_test_token, now};
use crate::support::rsa_keys::{jwks_security, mint_rs256, unreachable_jwks_security, TEST_KID};
use crate::support::test_state::build_test_state_with;

fn detail_request(token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

#[actix_web::test]
async fn rs256_token_from_key_set_is_accepted() {
    let (app, _state) = create_test_app(build_test_state_with(jwks_security().await).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_rs256(&claims_with(&["get:drinks-detail"], now() + 900), TEST_KID);

    let body = json_body(test::call_service(&app, detail_request(&token)).await, StatusCode::OK)
        .await;
    assert_eq!(body, json!({"success": true, "drinks": []}));
}

#[actix_web::test]
async fn rs256_token_lacking_permission_is_forbidden() {
    let (app, _state) = create_test_app(build_test_state_with(jwks_security().await).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_rs256(&claims_with(&["post:drinks"], now() + 900), TEST_KID);

    let resp = test::call_service(&app, detail_request(&token)).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Request Forbidden").await;
}

#[actix_web::test]
async fn unknown_kid_is_unauthorized() {
    let (app, _state) = create_test_app(build_test_state_with(jwks_security().await).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_rs256(&claims_with(&["get:drinks-detail"], now() + 900), "rotated-away");

    let resp = test::call_service(&app, detail_request(&token)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized access").await;
}

#[actix_web::test]
async fn shared_secret_token_is_rejected_by_key_set() {
    let (app, _state) = create_test_app(build_test_state_with(jwks_security().await).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_test_token(&["get:drinks-detail"]);

    let resp = test::call_service(&app, detail_request(&token)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized access").await;
}

#[actix_web::test]
async fn expired_rs256_token_is_unauthorized() {
    let (app, _state) = create_test_app(build_test_state_with(jwks_security().await).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_rs256(&claims_with(&["get:drinks-detail"], now() - 7200), TEST_KID);

    let resp = test::call_service(&app, detail_request(&token)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized access").await;
}

#[actix_web::test]
async fn unreachable_key_set_is_internal_error() {
    let (app, _state) = create_test_app(build_test_state_with(unreachable_jwks_security()).await)
        .with_prod_routes()
        .build()
        .await;
    let token = mint_rs256(&claims_with(&["get:drinks-detail"], now() + 900), TEST_KID);

    let resp = test::call_service(&app, detail_request(&token)).await;
    assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").await;
}
