//! Scenario tests for the failure paths of the auth endpoints
//!
//! Each test wires a fresh harness, so the scenarios stay independent.

mod common;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::json;

use sigil_api::app::create_app;
use sigil_core::services::verification::VerificationPurpose;

fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .find(|cookie| cookie.name() == name)
}

#[actix_web::test]
async fn test_login_rejects_wrong_password() {
    let harness = common::harness();
    common::seed_confirmed_user(&harness, "ada@example.com", "Abcd1234!").await;
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "Wrong999!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "invalid_credentials");
}

#[actix_web::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let harness = common::harness();
    common::seed_confirmed_user(&harness, "ada@example.com", "Abcd1234!").await;
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Same code as a wrong password, so the response never confirms
    // whether an address is registered.
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "invalid_credentials");
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Case differences collapse onto the same account.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "Ada@Example.com", "password": "Efgh5678?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "user_already_exists");
}

#[actix_web::test]
async fn test_registration_rejects_weak_password() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": "weakpassword" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "validation_error");
    assert_eq!(harness.users.len().await, 0);
}

#[actix_web::test]
async fn test_registration_rolls_back_when_mail_fails() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    harness.mailer.set_failing(true);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The half-created account is gone, so the address can try again.
    assert!(harness.users.is_empty().await);

    harness.mailer.set_failing(false);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_refresh_without_cookie_is_unauthorized() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "missing_refresh_token");
}

#[actix_web::test]
async fn test_refresh_with_garbage_cookie_is_unauthorized() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", "not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_forgot_password_is_neutral_for_unknown_email() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Nothing went out, but the body reads the same as for a real account.
    assert_eq!(harness.mailer.sent_count(), 0);
}

#[actix_web::test]
async fn test_password_reset_revokes_existing_sessions() {
    let harness = common::harness();
    common::seed_confirmed_user(&harness, "ada@example.com", "Abcd1234!").await;
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session_cookie = response_cookie(&resp, "refresh_token").expect("refresh cookie set");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mail = harness.mailer.last_sent().expect("reset mail captured");
    assert_eq!(mail.purpose, VerificationPurpose::PasswordReset);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(json!({ "token": mail.token, "new_password": "Xyzw9876?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The session from before the reset no longer refreshes.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(session_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The old password is out, the new one is in.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "Abcd1234!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "Xyzw9876?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_stale_reset_token_is_rejected() {
    let harness = common::harness();
    common::seed_confirmed_user(&harness, "ada@example.com", "Abcd1234!").await;
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let first = harness.mailer.last_sent().expect("first reset mail");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let second = harness.mailer.last_sent().expect("second reset mail");
    assert_ne!(first.token, second.token);

    // Issuing the second token overwrote the slot, the first is dead.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(json!({ "token": first.token, "new_password": "Xyzw9876?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(json!({ "token": second.token, "new_password": "Xyzw9876?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_requires_a_valid_access_token() {
    let harness = common::harness();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
