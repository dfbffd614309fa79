//! Scripted upstream client

use std::sync::{Arc, Mutex};

use adsync_core::AdPlatformClient;
use adsync_domain::{AdSyncError, Credential, Result as DomainResult};
use async_trait::async_trait;
use serde_json::Value;

/// Returns a fixed page (or error) and records every call.
#[derive(Clone)]
pub struct MockPlatformClient {
    response: Arc<Mutex<DomainResult<Vec<Value>>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

/// One recorded upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub token: String,
    /// `None` for account fetches.
    pub account_id: Option<String>,
}

impl MockPlatformClient {
    pub fn returning(page: Vec<Value>) -> Self {
        Self { response: Arc::new(Mutex::new(Ok(page))), calls: Arc::default() }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Err(AdSyncError::UpstreamUnavailable(
                message.to_string(),
            )))),
            calls: Arc::default(),
        }
    }

    /// Replace the scripted page for subsequent calls.
    pub fn set_page(&self, page: Vec<Value>) {
        *self.response.lock().unwrap() = Ok(page);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, credential: &Credential, account_id: Option<&str>) -> DomainResult<Vec<Value>> {
        self.calls.lock().unwrap().push(Call {
            token: credential.expose().to_string(),
            account_id: account_id.map(str::to_string),
        });
        self.response.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdPlatformClient for MockPlatformClient {
    async fn fetch_accounts(&self, credential: &Credential) -> DomainResult<Vec<Value>> {
        self.record(credential, None)
    }

    async fn fetch_campaigns(
        &self,
        credential: &Credential,
        account_id: &str,
    ) -> DomainResult<Vec<Value>> {
        self.record(credential, Some(account_id))
    }
}
