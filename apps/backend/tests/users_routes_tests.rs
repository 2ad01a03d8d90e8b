mod common;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{test, App};
use backend_test_support::error_body::assert_error_body;
use backend_test_support::unique_helpers::unique_email;
use common::{app_state, manual_tokens, HOUR};
use serde_json::{json, Value};
use studenthub::{routes, AuthGate, ExemptPaths, RequestTrace};

macro_rules! full_app {
    ($tokens:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthGate::new($tokens.clone(), ExemptPaths::default()))
                .wrap(RequestTrace)
                .app_data(app_state(&$tokens))
                .configure(routes::configure),
        )
        .await
    };
}

fn sign_up_body(email: &str, password: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": email,
        "bio": "Analyst",
        "password": password,
    })
}

#[actix_web::test]
async fn sign_up_login_and_use_credential() {
    let (tokens, _clock) = manual_tokens();
    let app = full_app!(tokens);
    let email = unique_email("signup");

    let req = test::TestRequest::post()
        .uri("/api/v1/users/sign-up")
        .set_json(sign_up_body(&email, "pw-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["email"], email);
    let user_id = body["data"]["id"].clone();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": email, "password": "pw-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["id"], user_id);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(tokens.validate(&token).unwrap().identity, email);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["profile"]["bio"], "Analyst");
    assert!(body["data"]["expires_at"].as_u64().unwrap() > 0);

    let req = test::TestRequest::get()
        .uri("/home")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], format!("Welcome back, {email}"));

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password").is_none());
    assert!(users[0].get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_sign_up_is_rejected() {
    let (tokens, _clock) = manual_tokens();
    let app = full_app!(tokens);
    let email = unique_email("dup");

    let req = test::TestRequest::post()
        .uri("/api/v1/users/sign-up")
        .set_json(sign_up_body(&email, "pw"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/sign-up")
        .set_json(sign_up_body(&email.to_uppercase(), "other"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp.map_into_boxed_body(),
        StatusCode::BAD_REQUEST,
        "USER_EXISTS",
        Some("User with this email already exists"),
    )
    .await;
}

#[actix_web::test]
async fn login_failures() {
    let (tokens, _clock) = manual_tokens();
    let app = full_app!(tokens);
    let email = unique_email("login");

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": email, "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp.map_into_boxed_body(),
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
        Some("Please sign up first"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/sign-up")
        .set_json(sign_up_body(&email, "pw"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": email, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp.map_into_boxed_body(),
        StatusCode::UNAUTHORIZED,
        "INVALID_PASSWORD",
        Some("Invalid password"),
    )
    .await;
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let (tokens, _clock) = manual_tokens();
    let app = full_app!(tokens);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/sign-up")
        .insert_header(ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp.map_into_boxed_body(),
        StatusCode::BAD_REQUEST,
        "INVALID_BODY",
        None,
    )
    .await;
}

#[actix_web::test]
async fn protected_routes_need_credential() {
    let (tokens, clock) = manual_tokens();
    let app = full_app!(tokens);

    for uri in ["/api/v1/users", "/api/v1/users/me", "/home"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_body(
            resp.map_into_boxed_body(),
            StatusCode::UNAUTHORIZED,
            "MISSING_CREDENTIAL",
            None,
        )
        .await;
    }

    let token = tokens.issue("a@mail.com", HOUR).unwrap();
    clock.advance(HOUR);
    let req = test::TestRequest::get()
        .uri("/home")
        .insert_header(("Authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_body(
        resp.map_into_boxed_body(),
        StatusCode::UNAUTHORIZED,
        "INVALID_OR_EXPIRED_CREDENTIAL",
        None,
    )
    .await;
}

#[actix_web::test]
async fn health_is_public() {
    let (tokens, _clock) = manual_tokens();
    let app = full_app!(tokens);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
