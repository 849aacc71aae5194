mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/categories", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = app
        .request(Method::GET, "/api/v1/categories", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.request(Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn signup_login_and_me() {
    let app = spawn_app().await;
    let token = app.signup("Ana@Example.com").await;

    let (status, me) = app
        .request(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ana@example.com");
    assert!(me.get("passwordHash").is_none());

    let (status, login) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "ana@example.com", "password": "hunter2hunter2"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["tokenType"], "Bearer");
    assert_eq!(login["user"]["id"], me["id"]);
    assert!(login["accessToken"].as_str().is_some());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    app.signup("ana@example.com").await;

    for body in [
        json!({"email": "ana@example.com", "password": "wrong-password"}),
        json!({"email": "nobody@example.com", "password": "hunter2hunter2"}),
    ] {
        let (status, response) = app
            .request(Method::POST, "/api/v1/auth/login", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn signup_rejects_duplicates_and_bad_input() {
    let app = spawn_app().await;
    app.signup("ana@example.com").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({"name": "Ana", "email": "ANA@example.com", "password": "hunter2hunter2"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({"name": "Bo", "email": "bo@example.com", "password": "short"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({"email": "bo@example.com", "password": "hunter2hunter2"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
