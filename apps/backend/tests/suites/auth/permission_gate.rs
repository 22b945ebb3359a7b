use actix_web::http::{Method, StatusCode};
use actix_web::test;
use coffee_backend::state::security_config::SecurityConfig;
use coffee_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::support::app_builder::create_test_app;
use crate::support::auth::{
    bearer_header, claims_with, mint_expired_token, now, sign_raw_payload, ALL_PERMISSIONS,
};
use crate::support::factory::create_water;
use crate::support::test_state::{build_test_state, TEST_AUDIENCE, TEST_ISSUER};

/// (method, path, permission) for every gated route; `{id}` is filled in.
const GATED: [(&str, &str, &str); 4] = [
    ("GET", "/drinks-detail", "get:drinks-detail"),
    ("POST", "/drinks", "post:drinks"),
    ("PATCH", "/drinks/{id}", "patch:drinks"),
    ("DELETE", "/drinks/{id}", "delete:drinks"),
];

fn gated_request(method: &str, path: &str, id: i32) -> test::TestRequest {
    let method = Method::from_bytes(method.as_bytes()).unwrap();
    let uri = path.replace("{id}", &id.to_string());
    let req = test::TestRequest::default().method(method.clone()).uri(&uri);
    if method == Method::POST || method == Method::PATCH {
        req.set_json(json!({
            "title": "gate check",
            "recipe": [{"name": "water", "color": "blue", "parts": 1}]
        }))
    } else {
        req
    }
}

async fn assert_every_route_rejects(
    authorization: Option<&str>,
    expected: StatusCode,
    message: &str,
) {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let water = create_water(state.db()).await;

    for (method, path, _) in GATED {
        let mut req = gated_request(method, path, water.id);
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_error_response(resp, expected, message).await;
    }
}

#[actix_web::test]
async fn missing_header_is_unauthorized() {
    assert_every_route_rejects(None, StatusCode::UNAUTHORIZED, "Unauthorized access").await;
}

#[actix_web::test]
async fn malformed_headers_are_unauthorized() {
    let token = crate::support::auth::mint_test_token(&ALL_PERMISSIONS);
    for value in [
        token.clone(),
        format!("Basic {token}"),
        "Bearer".to_string(),
        format!("Bearer {token} extra"),
    ] {
        assert_every_route_rejects(Some(&value), StatusCode::UNAUTHORIZED, "Unauthorized access")
            .await;
    }
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    assert_every_route_rejects(
        Some("Bearer abc.def.ghi"),
        StatusCode::UNAUTHORIZED,
        "Unauthorized access",
    )
    .await;
}

#[actix_web::test]
async fn expired_token_is_unauthorized() {
    let header = format!("Bearer {}", mint_expired_token(&ALL_PERMISSIONS));
    assert_every_route_rejects(Some(&header), StatusCode::UNAUTHORIZED, "Unauthorized access")
        .await;
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_unauthorized() {
    let other = SecurityConfig::new(b"another-secret".to_vec(), TEST_ISSUER, TEST_AUDIENCE);
    let token = coffee_backend::auth::mint_access_token(
        &claims_with(&ALL_PERMISSIONS, now() + 900),
        &other,
    )
    .unwrap();
    let header = format!("Bearer {token}");

    assert_every_route_rejects(Some(&header), StatusCode::UNAUTHORIZED, "Unauthorized access")
        .await;
}

#[actix_web::test]
async fn token_without_permissions_claim_is_unauthorized() {
    let token = sign_raw_payload(&json!({
        "sub": "auth0|no-rbac",
        "iss": TEST_ISSUER,
        "aud": TEST_AUDIENCE,
        "exp": now() + 900,
    }));
    let header = format!("Bearer {token}");

    assert_every_route_rejects(Some(&header), StatusCode::UNAUTHORIZED, "Unauthorized access")
        .await;
}

#[actix_web::test]
async fn token_for_another_audience_is_unauthorized() {
    let token = sign_raw_payload(&json!({
        "sub": "auth0|elsewhere",
        "iss": TEST_ISSUER,
        "aud": "another-api",
        "exp": now() + 900,
        "permissions": ALL_PERMISSIONS,
    }));
    let header = format!("Bearer {token}");

    assert_every_route_rejects(Some(&header), StatusCode::UNAUTHORIZED, "Unauthorized access")
        .await;
}

#[actix_web::test]
async fn valid_token_without_any_permission_is_forbidden() {
    let header = bearer_header(&[]);
    assert_every_route_rejects(Some(&header), StatusCode::FORBIDDEN, "Request Forbidden").await;
}

#[actix_web::test]
async fn each_route_accepts_only_its_own_permission() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    for (method, path, required) in GATED {
        let others: Vec<&str> = ALL_PERMISSIONS
            .iter()
            .copied()
            .filter(|p| *p != required)
            .collect();
        let water = create_water(state.db()).await;

        let req = gated_request(method, path, water.id)
            .insert_header(("Authorization", bearer_header(&others)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::FORBIDDEN, "Request Forbidden").await;

        let req = gated_request(method, path, water.id)
            .insert_header(("Authorization", bearer_header(&[required])))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{method} {path} with {required}");
    }
}

#[actix_web::test]
async fn audience_list_containing_ours_is_accepted() {
    let (app, _state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let token = sign_raw_payload(&json!({
        "sub": "auth0|multi",
        "iss": TEST_ISSUER,
        "aud": [TEST_AUDIENCE, "https://coffee-shop.test/userinfo"],
        "exp": now() + 900,
        "permissions": ["get:drinks-detail"],
    }));

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
