/// Meta Graph API client for ad accounts and campaigns
use adsync_core::AdPlatformClient;
use adsync_domain::constants::{
    ACCOUNT_ID_PREFIX, AD_ACCOUNT_FIELDS, CAMPAIGN_FIELDS, DEFAULT_GRAPH_API_BASE,
    DEFAULT_GRAPH_API_VERSION,
};
use adsync_domain::{AdSyncError, Credential, Result, UpstreamConfig};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::types::GraphPage;
use crate::http::HttpClient;

/// Read-only Graph API client.
///
/// One request per call, no retry, first page only.
#[derive(Clone, Debug)]
pub struct GraphApiClient {
    http_client: HttpClient,
    base_url: String,
    api_version: String,
}

impl GraphApiClient {
    /// Create a client against the public Graph API.
    pub fn new(http_client: HttpClient) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_GRAPH_API_BASE.to_string(),
            api_version: DEFAULT_GRAPH_API_VERSION.to_string(),
        }
    }

    /// Create a client from the upstream section of the configuration.
    ///
    /// # Errors
    /// Returns `AdSyncError::Config` if the base URL is not an absolute
    /// http(s) URL or the version segment is blank.
    pub fn from_config(http_client: HttpClient, config: &UpstreamConfig) -> Result<Self> {
        let base = url::Url::parse(&config.base_url).map_err(|err| {
            AdSyncError::Config(format!("invalid Graph API base URL '{}': {err}", config.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AdSyncError::Config(format!(
                "Graph API base URL must be http(s): {}",
                config.base_url
            )));
        }

        let version = config.api_version.trim().trim_matches('/');
        if version.is_empty() {
            return Err(AdSyncError::Config("Graph API version must not be empty".into()));
        }

        Ok(Self::new(http_client)
            .with_base_url(config.base_url.clone())
            .with_api_version(version))
    }

    /// Override the API host (tests point this at a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_version, path)
    }

    /// GET one list endpoint and return its `data` array.
    async fn get_page(&self, path: &str, fields: &str, credential: &Credential) -> Result<Vec<Value>> {
        let request = self
            .http_client
            .request(Method::GET, self.endpoint(path))
            .query(&[("fields", fields)])
            .bearer_auth(credential.expose());

        let response = self.http_client.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%path, status = status.as_u16(), "Graph API returned an error status");
            return Err(status_error(status.as_u16(), response.text().await));
        }

        let body = response
            .text()
            .await
            .map_err(|err| AdSyncError::UpstreamUnavailable(format!("failed to read body: {err}")))?;
        let page: GraphPage = serde_json::from_str(&body).map_err(|err| {
            AdSyncError::UpstreamUnavailable(format!("unexpected Graph API payload: {err}"))
        })?;

        if page.has_next() {
            warn!(
                %path,
                processed = page.data.len(),
                "Graph API reported more pages; only the first page is synced"
            );
        }

        debug!(%path, records = page.data.len(), "fetched Graph API page");
        Ok(page.data)
    }
}

#[async_trait]
impl AdPlatformClient for GraphApiClient {
    #[instrument(skip(self, credential))]
    async fn fetch_accounts(&self, credential: &Credential) -> Result<Vec<Value>> {
        self.get_page("me/adaccounts", AD_ACCOUNT_FIELDS, credential).await
    }

    #[instrument(skip(self, credential))]
    async fn fetch_campaigns(&self, credential: &Credential, account_id: &str) -> Result<Vec<Value>> {
        let path = format!("{ACCOUNT_ID_PREFIX}{account_id}/campaigns");
        self.get_page(&path, CAMPAIGN_FIELDS, credential).await
    }
}

/// Build the error for a non-2xx answer, keeping the body or the reason it
/// could not be read.
fn status_error<E: std::fmt::Display>(
    status: u16,
    body: std::result::Result<String, E>,
) -> AdSyncError {
    let body = body.unwrap_or_else(|err| format!("<error body unreadable: {err}>"));
    AdSyncError::UpstreamUnavailable(format!("Meta API error ({status}): {body}"))
}
