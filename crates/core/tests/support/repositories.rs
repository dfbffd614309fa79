//! In-memory repository implementations for testing
//!
//! Each mock mirrors the contract of its SQLite counterpart closely enough
//! for orchestration tests: keyed upserts that keep `created_at`, all-or-
//! nothing batches and orphan detection for campaigns.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use adsync_core::{AdAccountRepository, CampaignRepository, UserProfileRepository};
use adsync_domain::{
    AdAccount, AdSyncError, Campaign, Credential, Result as DomainResult, UserProfile,
};
use async_trait::async_trait;

/// In-memory mock for `AdAccountRepository`.
#[derive(Default, Clone)]
pub struct MockAccountRepository {
    rows: Arc<Mutex<HashMap<String, AdAccount>>>,
    upsert_calls: Arc<Mutex<usize>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<AdAccount> {
        let mut rows: Vec<_> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }

    pub fn upsert_calls(&self) -> usize {
        *self.upsert_calls.lock().unwrap()
    }
}

#[async_trait]
impl AdAccountRepository for MockAccountRepository {
    async fn upsert_accounts(&self, accounts: Vec<AdAccount>) -> DomainResult<usize> {
        *self.upsert_calls.lock().unwrap() += 1;
        let mut rows = self.rows.lock().unwrap();
        let count = accounts.len();
        for mut account in accounts {
            if let Some(existing) = rows.get(&account.id) {
                account.created_at = existing.created_at;
            }
            rows.insert(account.id.clone(), account);
        }
        Ok(count)
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<AdAccount>> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<AdAccount>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|account| account.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

/// In-memory mock for `CampaignRepository`.
///
/// Shares the account map with a [`MockAccountRepository`] so orphan
/// detection sees the same accounts the account sync wrote.
#[derive(Clone)]
pub struct MockCampaignRepository {
    accounts: MockAccountRepository,
    rows: Arc<Mutex<HashMap<String, Campaign>>>,
}

impl MockCampaignRepository {
    pub fn new(accounts: MockAccountRepository) -> Self {
        Self { accounts, rows: Arc::default() }
    }

    pub fn rows(&self) -> Vec<Campaign> {
        let mut rows: Vec<_> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }
}

#[async_trait]
impl CampaignRepository for MockCampaignRepository {
    async fn upsert_campaigns(&self, campaigns: Vec<Campaign>) -> DomainResult<usize> {
        let known = self.accounts.rows.lock().unwrap();
        if let Some(orphan) = campaigns.iter().find(|c| !known.contains_key(&c.account_id)) {
            return Err(AdSyncError::OrphanRecord(format!(
                "campaign {} references unknown ad account {}",
                orphan.id, orphan.account_id
            )));
        }

        let mut rows = self.rows.lock().unwrap();
        let count = campaigns.len();
        for mut campaign in campaigns {
            if let Some(existing) = rows.get(&campaign.id) {
                campaign.created_at = existing.created_at;
            }
            rows.insert(campaign.id.clone(), campaign);
        }
        Ok(count)
    }

    async fn list_by_account(&self, account_id: &str) -> DomainResult<Vec<Campaign>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// In-memory mock for `UserProfileRepository`.
#[derive(Default, Clone)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    tokens: Arc<Mutex<HashMap<String, Credential>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored credential for `user_id`.
    pub fn with_token(self, user_id: &str, token: &str) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert(user_id.to_string(), Credential::parse(token).unwrap());
        self
    }
}

#[async_trait]
impl UserProfileRepository for MockProfileRepository {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> DomainResult<()> {
        self.profiles.lock().unwrap().insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn store_access_token(&self, user_id: &str, credential: &Credential) -> DomainResult<()> {
        self.tokens.lock().unwrap().insert(user_id.to_string(), credential.clone());
        Ok(())
    }

    async fn get_access_token(&self, user_id: &str) -> DomainResult<Option<Credential>> {
        Ok(self.tokens.lock().unwrap().get(user_id).cloned())
    }
}
