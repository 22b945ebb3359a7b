use actix_web::http::StatusCode;
use actix_web::test;
use coffee_backend::repos::drinks;
use coffee_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::common::json_body;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{barista_header, bearer_header};
use crate::support::factory::create_latte;
use crate::support::test_state::build_test_state;

fn patcher() -> String {
    bearer_header(&["patch:drinks"])
}

#[actix_web::test]
async fn retitles_drink_and_returns_list_of_one() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let latte = create_latte(state.db()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", latte.id))
        .insert_header(("Authorization", patcher()))
        .set_json(json!({"title": "oat latte"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["drinks"].as_array().unwrap().len(), 1);
    assert_eq!(body["drinks"][0]["id"], json!(latte.id));
    assert_eq!(body["drinks"][0]["title"], "oat latte");
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], "milk");

    let stored = drinks::find_by_id(state.db(), latte.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "oat latte");
    assert_eq!(stored.recipe, latte.recipe);
}

#[actix_web::test]
async fn recipe_in_body_is_ignored() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let latte = create_latte(state.db()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", latte.id))
        .insert_header(("Authorization", patcher()))
        .set_json(json!({"title": "cortado", "recipe": {"name": "x", "color": "y", "parts": 9}}))
        .to_request();
    json_body(test::call_service(&app, req).await, StatusCode::OK).await;

    let stored = drinks::find_by_id(state.db(), latte.id).await.unwrap().unwrap();
    assert_eq!(stored.recipe, latte.recipe);
}

#[actix_web::test]
async fn invalid_title_is_bad_request_and_leaves_title_unchanged() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let latte = create_latte(state.db()).await;

    for body in [
        json!({"title": ""}),
        json!({"title": 7}),
        json!({"title": null}),
        json!({"title": ["latte"]}),
        json!({}),
    ] {
        let req = test::TestRequest::patch()
            .uri(&format!("/drinks/{}", latte.id))
            .insert_header(("Authorization", patcher()))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    }

    let stored = drinks::find_by_id(state.db(), latte.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "latte");
}

#[actix_web::test]
async fn whitespace_title_is_accepted() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let latte = create_latte(state.db()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", latte.id))
        .insert_header(("Authorization", patcher()))
        .set_json(json!({"title": "   "}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["drinks"][0]["title"], "   ");
    let stored = drinks::find_by_id(state.db(), latte.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "   ");
}

#[actix_web::test]
async fn unknown_id_is_not_found() {
    let (app, _state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    for uri in ["/drinks/999", "/drinks/abc", "/drinks/-1"] {
        let req = test::TestRequest::patch()
            .uri(uri)
            .insert_header(("Authorization", patcher()))
            .set_json(json!({"title": "ghost"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::NOT_FOUND, "Resource not found").await;
    }
}

#[actix_web::test]
async fn gate_runs_before_lookup() {
    let (app, _state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::patch()
        .uri("/drinks/999")
        .set_json(json!({"title": "ghost"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized access").await;
}

#[actix_web::test]
async fn update_requires_patch_permission() {
    let (app, state) = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let latte = create_latte(state.db()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", latte.id))
        .insert_header(("Authorization", barista_header()))
        .set_json(json!({"title": "stolen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, StatusCode::FORBIDDEN, "Request Forbidden").await;
    let stored = drinks::find_by_id(state.db(), latte.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "latte");
}
