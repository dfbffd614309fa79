//! Profile endpoints

use adsync_core::UserProfileRepository;
use adsync_domain::{AdSyncError, Credential};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::{authorization, ApiError, Envelope, SharedContext};

/// Body of `PUT /profile/access-token`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAccessTokenBody {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Store the caller's upstream credential on their profile.
///
/// The token is never echoed back.
pub async fn store_access_token(
    State(ctx): State<SharedContext>,
    headers: HeaderMap,
    payload: Result<Json<StoreAccessTokenBody>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let Json(body) = payload?;
    let session = ctx.authenticate(authorization(&headers)).await?;

    let credential = body
        .access_token
        .as_deref()
        .and_then(Credential::parse)
        .ok_or(AdSyncError::MissingCredential)?;

    ctx.user_profile.store_access_token(&session.user_id, &credential).await?;
    info!(user_id = %session.user_id, "stored upstream credential for user");

    Ok(Json(Envelope::success("Access token saved")))
}
