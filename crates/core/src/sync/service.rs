//! Sync services - one orchestrator per entity type

use std::sync::Arc;

use adsync_domain::{AdSyncError, SyncEntity, SyncOutcome, SyncReport};
use chrono::Utc;
use serde_json::Value;
use tracing::instrument;

use super::credential::{CredentialRequest, CredentialSupplier};
use super::orchestrator::SyncRun;
use super::ports::{AdAccountRepository, AdPlatformClient, CampaignRepository};
use super::transform::{normalize_account_id, transform_accounts, transform_campaigns};

/// Input of one account sync.
#[derive(Debug, Clone)]
pub struct AccountSyncRequest {
    /// Local user that will own the synced accounts.
    pub user_id: String,
    pub credential: CredentialRequest,
}

/// Input of one campaign sync.
#[derive(Debug, Clone)]
pub struct CampaignSyncRequest {
    /// Account id as sent by the caller (`act_<digits>` or `<digits>`).
    pub account_id: String,
    /// Caller, when known. Needed only for the stored-credential fallback.
    pub user_id: Option<String>,
    pub credential: CredentialRequest,
}

/// Mirrors the caller's ad accounts into the local store.
pub struct AccountSyncService {
    client: Arc<dyn AdPlatformClient>,
    accounts: Arc<dyn AdAccountRepository>,
    credentials: CredentialSupplier,
}

impl AccountSyncService {
    pub fn new(
        client: Arc<dyn AdPlatformClient>,
        accounts: Arc<dyn AdAccountRepository>,
        credentials: CredentialSupplier,
    ) -> Self {
        Self { client, accounts, credentials }
    }

    /// Fetch one page of accounts and upsert it.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn sync(&self, request: AccountSyncRequest) -> SyncOutcome {
        let AccountSyncRequest { user_id, credential } = request;
        let owner = user_id.as_str();

        SyncRun::new(SyncEntity::AdAccounts)
            .execute(
                async {
                    let credential = self.credentials.supply(&credential, Some(owner)).await?;
                    self.client.fetch_accounts(&credential).await
                },
                |raw: Vec<Value>| async move {
                    let fetched = raw.len();
                    let outcome = transform_accounts(raw, owner, Utc::now().timestamp());
                    let upserted = self.accounts.upsert_accounts(outcome.records).await?;
                    Ok::<_, AdSyncError>(SyncReport {
                        entity: SyncEntity::AdAccounts,
                        fetched,
                        upserted,
                        skipped: outcome.skipped,
                    })
                },
            )
            .await
    }
}

/// Mirrors the campaigns of one ad account into the local store.
pub struct CampaignSyncService {
    client: Arc<dyn AdPlatformClient>,
    campaigns: Arc<dyn CampaignRepository>,
    credentials: CredentialSupplier,
}

impl CampaignSyncService {
    pub fn new(
        client: Arc<dyn AdPlatformClient>,
        campaigns: Arc<dyn CampaignRepository>,
        credentials: CredentialSupplier,
    ) -> Self {
        Self { client, campaigns, credentials }
    }

    /// Fetch one page of campaigns for the account and upsert it.
    #[instrument(skip(self, request), fields(account_id = %request.account_id))]
    pub async fn sync(&self, request: CampaignSyncRequest) -> SyncOutcome {
        let CampaignSyncRequest { account_id, user_id, credential } = request;

        SyncRun::new(SyncEntity::Campaigns)
            .execute(
                async {
                    let credential =
                        self.credentials.supply(&credential, user_id.as_deref()).await?;
                    let key = normalize_account_id(&account_id)?;
                    let raw = self.client.fetch_campaigns(&credential, &key).await?;
                    Ok::<_, AdSyncError>((key, raw))
                },
                |(key, raw): (String, Vec<Value>)| async move {
                    let fetched = raw.len();
                    let outcome = transform_campaigns(raw, &key, Utc::now().timestamp());
                    let upserted = self.campaigns.upsert_campaigns(outcome.records).await?;
                    Ok::<_, AdSyncError>(SyncReport {
                        entity: SyncEntity::Campaigns,
                        fetched,
                        upserted,
                        skipped: outcome.skipped,
                    })
                },
            )
            .await
    }
}
