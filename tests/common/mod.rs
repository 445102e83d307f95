// tests/common/mod.rs
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use ensa_portal::auth::Role;
use ensa_portal::{create_router, AppState, PortalConfig};

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Full router over an in-memory database with migrations applied.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(PortalConfig::for_tests()).await
}

pub async fn spawn_app_with(config: PortalConfig) -> TestApp {
    let state = AppState::from_config(config)
        .await
        .expect("create test state");
    let router = create_router(state.clone());
    TestApp { router, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token, None).await
    }

    /// Registers an account and returns its token.
    pub async fn register(&self, name: &str, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/users",
                None,
                json!({ "name": name, "email": email, "password": "secret123" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Registers an account, promotes it and returns its token.
    pub async fn register_admin(&self, name: &str, email: &str) -> String {
        let token = self.register(name, email).await;
        self.state
            .auth_service
            .set_role_by_email(email, Role::Admin)
            .await
            .unwrap();
        token
    }

    pub async fn user_id(&self, token: &str) -> String {
        let (status, me) = self.get("/api/auth", Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        me["_id"].as_str().unwrap().to_string()
    }
}
