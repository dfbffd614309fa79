//! Sync endpoints
//!
//! Both endpoints run one sync invocation and translate its terminal state
//! into the response envelope.

use std::time::Instant;

use adsync_core::{AccountSyncRequest, CampaignSyncRequest, CredentialRequest};
use adsync_domain::{AdSyncError, Credential, SyncEntity, SyncOutcome};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::{authorization, ApiError, Envelope, SharedContext};
use crate::utils::logging::log_sync_execution;

/// Body of `POST /sync-ad-accounts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAdAccountsBody {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub use_stored_token: bool,
}

/// Body of `POST /sync-campaigns`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCampaignsBody {
    #[serde(default)]
    pub ad_account_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub use_stored_token: bool,
}

/// Mirror the caller's ad accounts.
///
/// The owning user is resolved from the caller's session, never from the
/// body. Without the stored-token opt-in the credential is checked first, so
/// a blank token is reported as missing even when the session is absent.
pub async fn sync_ad_accounts(
    State(ctx): State<SharedContext>,
    headers: HeaderMap,
    payload: Result<Json<SyncAdAccountsBody>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let Json(body) = payload?;
    if !body.use_stored_token && body.access_token.as_deref().and_then(Credential::parse).is_none() {
        return Err(AdSyncError::MissingCredential.into());
    }
    let session = ctx.authenticate(authorization(&headers)).await?;

    let request = AccountSyncRequest {
        user_id: session.user_id,
        credential: CredentialRequest {
            supplied: body.access_token,
            use_stored: body.use_stored_token,
        },
    };

    let start = Instant::now();
    let outcome = ctx.account_sync.sync(request).await;
    log_sync_execution(SyncEntity::AdAccounts, start.elapsed(), &outcome);

    respond(outcome)
}

/// Mirror the campaigns of one ad account.
///
/// A session is required only when the stored credential is requested.
pub async fn sync_campaigns(
    State(ctx): State<SharedContext>,
    headers: HeaderMap,
    payload: Result<Json<SyncCampaignsBody>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let Json(body) = payload?;

    let user_id = if body.use_stored_token {
        Some(ctx.authenticate(authorization(&headers)).await?.user_id)
    } else {
        None
    };

    let request = CampaignSyncRequest {
        account_id: body.ad_account_id,
        user_id,
        credential: CredentialRequest {
            supplied: body.access_token,
            use_stored: body.use_stored_token,
        },
    };

    let start = Instant::now();
    let outcome = ctx.campaign_sync.sync(request).await;
    log_sync_execution(SyncEntity::Campaigns, start.elapsed(), &outcome);

    respond(outcome)
}

fn respond(outcome: SyncOutcome) -> Result<Json<Envelope>, ApiError> {
    let report = outcome.into_result()?;
    Ok(Json(Envelope::success(report.summary())))
}
