//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use adsync_core::{
    AccountSyncService, AdAccountRepository, AdPlatformClient, CampaignRepository,
    CampaignSyncService, CredentialSupplier, SessionRepository, UserProfileRepository,
};
use adsync_domain::{AdSyncError, Config, Result, Session};
use adsync_infra::{
    DbManager, GraphApiClient, HttpClient, SqliteAdAccountRepository, SqliteCampaignRepository,
    SqliteSessionRepository, SqliteUserProfileRepository,
};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Type alias for user profile repository port trait object
type DynUserProfileRepository = dyn UserProfileRepository + Send + Sync + 'static;

/// Type alias for session repository port trait object
type DynSessionRepository = dyn SessionRepository + Send + Sync + 'static;

/// Type alias for ad account repository port trait object
type DynAdAccountRepository = dyn AdAccountRepository + Send + Sync + 'static;

/// Type alias for campaign repository port trait object
type DynCampaignRepository = dyn CampaignRepository + Send + Sync + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub user_profile: Arc<DynUserProfileRepository>,
    pub sessions: Arc<DynSessionRepository>,
    pub ad_accounts: Arc<DynAdAccountRepository>,
    pub campaigns: Arc<DynCampaignRepository>,

    // Sync pipelines
    pub account_sync: Arc<AccountSyncService>,
    pub campaign_sync: Arc<CampaignSyncService>,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// Opens the database, applies the schema and wires the Graph API client
    /// into both sync pipelines.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()?;
        let client: Arc<dyn AdPlatformClient> =
            Arc::new(GraphApiClient::from_config(http_client, &config.upstream)?);

        Self::with_platform_client(config, client)
    }

    /// Build the context around an existing upstream client.
    ///
    /// Tests use this to point the pipelines at a mock server.
    pub fn with_platform_client(config: Config, client: Arc<dyn AdPlatformClient>) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.database)?);
        db.run_migrations()?;

        let user_profile: Arc<DynUserProfileRepository> =
            Arc::new(SqliteUserProfileRepository::new(db.clone()));
        let sessions: Arc<DynSessionRepository> =
            Arc::new(SqliteSessionRepository::new(db.clone()));
        let ad_accounts: Arc<DynAdAccountRepository> =
            Arc::new(SqliteAdAccountRepository::new(db.clone()));
        let campaigns: Arc<DynCampaignRepository> =
            Arc::new(SqliteCampaignRepository::new(db.clone()));

        let credentials = CredentialSupplier::new(user_profile.clone());
        let account_sync = Arc::new(AccountSyncService::new(
            client.clone(),
            ad_accounts.clone(),
            credentials.clone(),
        ));
        let campaign_sync =
            Arc::new(CampaignSyncService::new(client, campaigns.clone(), credentials));

        tracing::info!(
            db_path = %db.path().display(),
            upstream = %config.upstream.base_url,
            version = %config.upstream.api_version,
            "application context initialised"
        );

        Ok(Self {
            config,
            db,
            user_profile,
            sessions,
            ad_accounts,
            campaigns,
            account_sync,
            campaign_sync,
        })
    }

    /// Resolve the caller's session from a raw `Authorization` header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Session> {
        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AdSyncError::Unauthorized("missing session token".into()))?;

        self.sessions.resolve(token).await
    }

    /// Check health of the application components
    pub async fn health_check(&self) -> HealthStatus {
        HealthStatus::new().add_component(self.check_database_health().await)
    }

    /// Check database health by attempting a simple query
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime with synchronous
    /// database operations.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = self.db.clone();
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }
}
