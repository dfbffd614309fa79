//! User profile repository implementation using SQLite
//!
//! Profiles are created by the external login flow. The upstream credential
//! lives only in `user_profiles.meta_access_token` and is read back through
//! [`UserProfileRepositoryPort::get_access_token`].

use std::sync::Arc;

use adsync_core::UserProfileRepository as UserProfileRepositoryPort;
use adsync_domain::{AdSyncError, Credential, Result as DomainResult, UserProfile};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

/// SQLite-backed implementation of `UserProfileRepository`
pub struct SqliteUserProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteUserProfileRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserProfileRepositoryPort for SqliteUserProfileRepository {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<UserProfile>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<UserProfile>> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT id, email, created_at, updated_at FROM user_profiles WHERE id = ?1",
                params![&id],
                map_user_profile_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn upsert(&self, profile: UserProfile) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO user_profiles (id, email, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    email = excluded.email,
                    updated_at = excluded.updated_at",
                params![&profile.id, &profile.email, profile.created_at, profile.updated_at],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    #[instrument(skip(self, credential))]
    async fn store_access_token(&self, user_id: &str, credential: &Credential) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let token = credential.expose().to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE user_profiles SET meta_access_token = ?1, updated_at = ?2 WHERE id = ?3",
                    params![&token, Utc::now().timestamp(), &user_id],
                )
                .map_err(map_sql_error)?;

            if updated == 0 {
                return Err(AdSyncError::Unauthorized(format!("unknown user {user_id}")));
            }

            debug!(user_id = %user_id, "stored upstream credential");
            Ok(())
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn get_access_token(&self, user_id: &str) -> DomainResult<Option<Credential>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Credential>> {
            let conn = db.get_connection()?;
            let token: Option<Option<String>> = conn
                .query_row(
                    "SELECT meta_access_token FROM user_profiles WHERE id = ?1",
                    params![&user_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;

            Ok(token.flatten().as_deref().and_then(Credential::parse))
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a UserProfile
fn map_user_profile_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        email: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
