//! HTTP routes
//!
//! Every failure is answered with `500 { success: false, error }`, where
//! `error` is the display text of the underlying [`AdSyncError`].

pub mod accounts;
pub mod health;
pub mod profile;
pub mod sync;

use std::sync::Arc;

use adsync_domain::AdSyncError;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Shared state handed to every handler.
pub type SharedContext = Arc<AppContext>;

/// Build the application router.
pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/sync-ad-accounts", post(sync::sync_ad_accounts))
        .route("/sync-campaigns", post(sync::sync_campaigns))
        .route("/profile/access-token", put(profile::store_access_token))
        .route("/ad-accounts", get(accounts::list_ad_accounts))
        .route("/ad-accounts/{id}/campaigns", get(accounts::list_campaigns))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(ctx)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// Response body of the write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, message: None, error: Some(error.into()) }
    }
}

/// Handler error rendered as the failure envelope.
#[derive(Debug)]
pub struct ApiError(pub AdSyncError);

impl From<AdSyncError> for ApiError {
    fn from(err: AdSyncError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AdSyncError::InvalidInput(format!("invalid request body: {}", rejection.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(Envelope::failure(self.0.to_string())))
            .into_response()
    }
}

/// Raw `Authorization` header value, if present and valid UTF-8.
pub(crate) fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}
