#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem;
use common::{bearer, t0, DAY};
use market_backend::state::ManualClock;
use market_backend::{issue_token, verify_token, AppState, SecurityConfig};
use serde_json::{json, Value};

fn fresh_state() -> (AppState, ManualClock) {
    let clock = ManualClock::new(t0());
    let state =
        AppState::in_memory(SecurityConfig::for_tests()).with_clock(Arc::new(clock.clone()));
    (state, clock)
}

fn alice() -> Value {
    json!({
        "username": "alice",
        "password": "wonderland",
        "email": "alice@example.com",
        "phone": "555-0100"
    })
}

#[actix_web::test]
async fn test_register_issues_token_for_new_user() {
    let (state, _clock) = fresh_state();
    let security = state.security.clone();
    let app = market_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(alice())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password").is_none());

    let claims = verify_token(body["token"].as_str().unwrap(), t0(), &security).unwrap();
    assert_eq!(Some(claims.user_id), body["user"]["user_id"].as_u64());
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, DAY.as_secs() as i64);
}

#[actix_web::test]
async fn test_register_rejects_taken_username() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::post().uri("/register").set_json(alice()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post().uri("/register").set_json(alice()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "USERNAME_TAKEN").await;
}

#[actix_web::test]
async fn test_register_validation_and_bad_json() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": "al", "password": "wonderland", "phone": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn test_login_then_profile() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::post().uri("/register").set_json(alice()).to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "wonderland" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = test::read_body_json(resp).await;
    let token = login["token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile, registered["user"]);
}

#[actix_web::test]
async fn test_wrong_password_issues_no_token() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::post().uri("/register").set_json(alice()).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "not-the-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
}

#[actix_web::test]
async fn test_login_unknown_user() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "nobody", "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
}

#[actix_web::test]
async fn test_profile_requires_valid_session() {
    let (state, clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;

    let req = test::TestRequest::post().uri("/register").set_json(alice()).to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    let token = registered["token"].as_str().unwrap().to_string();

    clock.advance(DAY);
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
}

#[actix_web::test]
async fn test_profile_for_vanished_user_is_not_found() {
    let (state, _clock) = fresh_state();
    let token = issue_token(999, "ghost", t0(), &state.security).unwrap();
    let app = market_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND").await;
}

#[actix_web::test]
async fn test_unknown_route_is_problem_404() {
    let (state, _clock) = fresh_state();
    let app = market_app!(state);

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
