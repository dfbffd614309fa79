//! Port interfaces for user profile management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for user and session lookups.

use adsync_domain::{Credential, Result, Session, UserProfile};
use async_trait::async_trait;

/// Trait for user profile persistence and retrieval
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Get user profile by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Insert or update a profile keyed on `id`
    async fn upsert(&self, profile: UserProfile) -> Result<()>;

    /// Store the upstream credential on the user's profile
    async fn store_access_token(&self, user_id: &str, credential: &Credential) -> Result<()>;

    /// Previously stored upstream credential, if any
    async fn get_access_token(&self, user_id: &str) -> Result<Option<Credential>>;
}

/// Trait for caller session lookups
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a session token for a user, valid until `expires_at`
    async fn issue(&self, user_id: &str, token: &str, expires_at: i64) -> Result<()>;

    /// Resolve a session token, failing with `Unauthorized` when it is
    /// unknown or expired
    async fn resolve(&self, token: &str) -> Result<Session>;

    /// Remove a session token
    async fn revoke(&self, token: &str) -> Result<()>;
}
