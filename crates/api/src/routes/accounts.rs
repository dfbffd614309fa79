//! Read endpoints over the local mirror

use adsync_core::sync::transform::normalize_account_id;
use adsync_core::{AdAccountRepository, CampaignRepository};
use adsync_domain::{AdAccount, AdSyncError, Campaign};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use super::{authorization, ApiError, SharedContext};

/// The caller's ad accounts, ordered by name.
pub async fn list_ad_accounts(
    State(ctx): State<SharedContext>,
    headers: HeaderMap,
) -> Result<Json<Vec<AdAccount>>, ApiError> {
    let session = ctx.authenticate(authorization(&headers)).await?;
    Ok(Json(ctx.ad_accounts.list_for_user(&session.user_id).await?))
}

/// Campaigns of one of the caller's accounts, newest first.
///
/// Accepts the id with or without the `act_` prefix.
pub async fn list_campaigns(
    State(ctx): State<SharedContext>,
    headers: HeaderMap,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let session = ctx.authenticate(authorization(&headers)).await?;
    let key = normalize_account_id(&account_id)?;

    let owned = ctx
        .ad_accounts
        .get_by_id(&key)
        .await?
        .is_some_and(|account| account.user_id == session.user_id);
    if !owned {
        return Err(AdSyncError::Unauthorized(format!(
            "ad account {key} is not linked to this user"
        ))
        .into());
    }

    Ok(Json(ctx.campaigns.list_by_account(&key).await?))
}
