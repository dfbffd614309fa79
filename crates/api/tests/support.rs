#![allow(dead_code)]

use std::sync::Arc;

use adsync_core::{SessionRepository, UserProfileRepository};
use adsync_domain::{Config, DatabaseConfig, UpstreamConfig, UserProfile};
use adsync_server::{router, AppContext};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

/// Full application wired against a temporary database and a mock Graph API.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub upstream: MockServer,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let upstream = MockServer::start().await;

        let config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("adsync.db").to_string_lossy().to_string(),
                pool_size: 4,
            },
            upstream: UpstreamConfig {
                base_url: upstream.uri(),
                api_version: "v18.0".into(),
                timeout_secs: 5,
            },
            ..Config::default()
        };

        let ctx = AppContext::new_with_config(config).expect("context should initialise");
        Self { ctx: Arc::new(ctx), upstream, _temp_dir: temp_dir }
    }

    /// Create a profile and a live session for it; returns the session token.
    pub async fn login(&self, user_id: &str) -> String {
        let now = Utc::now().timestamp();
        self.ctx
            .user_profile
            .upsert(UserProfile {
                id: user_id.to_string(),
                email: Some(format!("{user_id}@example.com")),
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("profile should be stored");

        let token = format!("session-{user_id}");
        self.ctx.sessions.issue(user_id, &token, now + 3600).await.expect("session should issue");
        token
    }

    /// Send a request through a fresh router and decode the JSON body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response =
            router(self.ctx.clone()).oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, body)
    }
}

pub fn json_request(method: Method, uri: &str, session: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder =
        Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = session {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request should build")
}

pub fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}
