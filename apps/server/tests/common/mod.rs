#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use budgetly_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        db_path: dir.path().join("budgetly.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: vec![42u8; 32],
        token_ttl: Duration::from_secs(3600),
        log_format: "text".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, value)
    }

    /// Signs up a fresh user and returns their bearer token.
    pub async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(json!({"name": "Test User", "email": email, "password": "hunter2hunter2"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
        body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn create_category(&self, token: &str, limit: f64, month: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/categories",
                Some(token),
                Some(json!({"name": "Travel", "color": "#0ea5e9", "limit": limit, "month": month})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create category failed: {body}");
        body
    }
}
