//! Port interfaces for sync operations

use adsync_domain::{AdAccount, Campaign, Credential, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Read access to the ad-platform API.
///
/// Implementations issue exactly one authenticated request per call and do
/// not retry. The returned values are the upstream `data` array, decoded as
/// JSON but otherwise untouched.
#[async_trait]
pub trait AdPlatformClient: Send + Sync {
    /// Fetch the first page of ad accounts visible to the credential.
    async fn fetch_accounts(&self, credential: &Credential) -> Result<Vec<Value>>;

    /// Fetch the first page of campaigns of one account.
    ///
    /// `account_id` is the storage key (digits, without `act_`).
    async fn fetch_campaigns(&self, credential: &Credential, account_id: &str)
        -> Result<Vec<Value>>;
}

/// Trait for ad account persistence
#[async_trait]
pub trait AdAccountRepository: Send + Sync {
    /// Insert or overwrite the batch atomically, keyed on `id`.
    /// Returns the number of rows written.
    async fn upsert_accounts(&self, accounts: Vec<AdAccount>) -> Result<usize>;

    /// Get an account by storage key
    async fn get_by_id(&self, id: &str) -> Result<Option<AdAccount>>;

    /// Accounts synced for a user, ordered by name
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AdAccount>>;
}

/// Trait for campaign persistence
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Insert or overwrite the batch atomically, keyed on `id`.
    ///
    /// Every record must reference an existing account, otherwise the whole
    /// batch fails with `OrphanRecord` and nothing is written.
    async fn upsert_campaigns(&self, campaigns: Vec<Campaign>) -> Result<usize>;

    /// Campaigns of one account, newest first
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Campaign>>;
}
