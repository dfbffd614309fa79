//! Health check endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::SharedContext;
use crate::utils::health::HealthStatus;

/// `200 { status: "ok" }` when the store answers, `503` otherwise.
pub async fn health(State(ctx): State<SharedContext>) -> (StatusCode, Json<HealthStatus>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
