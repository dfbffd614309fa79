//! Session repository implementation using SQLite
//!
//! Only a SHA-256 digest of each session token is stored.

use std::sync::Arc;

use adsync_core::SessionRepository;
use adsync_domain::{AdSyncError, Result as DomainResult, Session};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};
use tokio::task;
use tracing::instrument;

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

/// SQLite-backed implementation of `SessionRepository`
pub struct SqliteSessionRepository {
    db: Arc<DbManager>,
}

impl SqliteSessionRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[instrument(skip(self, token))]
    async fn issue(&self, user_id: &str, token: &str, expires_at: i64) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let token_hash = hash_token(token);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO user_sessions (token_hash, user_id, expires_at, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(token_hash) DO UPDATE SET
                    user_id = excluded.user_id,
                    expires_at = excluded.expires_at",
                params![&token_hash, &user_id, expires_at, Utc::now().timestamp()],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn resolve(&self, token: &str) -> DomainResult<Session> {
        let db = Arc::clone(&self.db);
        let token_hash = hash_token(token);

        task::spawn_blocking(move || -> DomainResult<Session> {
            let conn = db.get_connection()?;
            let session = conn
                .query_row(
                    "SELECT user_id, expires_at FROM user_sessions WHERE token_hash = ?1",
                    params![&token_hash],
                    |row| Ok(Session { user_id: row.get(0)?, expires_at: row.get(1)? }),
                )
                .optional()
                .map_err(map_sql_error)?
                .ok_or_else(|| AdSyncError::Unauthorized("unknown session".into()))?;

            if session.expires_at <= Utc::now().timestamp() {
                return Err(AdSyncError::Unauthorized("session expired".into()));
            }

            Ok(session)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn revoke(&self, token: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let token_hash = hash_token(token);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM user_sessions WHERE token_hash = ?1", params![&token_hash])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }
}

/// Hex-encoded SHA-256 of a session token.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
