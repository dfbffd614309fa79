//! Ad account repository implementation using SQLite
//!
//! Rows are keyed on the upstream account id (without `act_`). A batch is
//! applied inside one transaction; `created_at` survives re-syncs.

use std::collections::BTreeSet;
use std::sync::Arc;

use adsync_core::AdAccountRepository;
use adsync_domain::{AdAccount, Result as DomainResult};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

const UPSERT_ACCOUNT_SQL: &str = "INSERT INTO ad_accounts (
        id, user_id, name, currency, timezone, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(id) DO UPDATE SET
        user_id = excluded.user_id,
        name = excluded.name,
        currency = excluded.currency,
        timezone = excluded.timezone,
        updated_at = excluded.updated_at";

const SELECT_ACCOUNT_COLUMNS: &str =
    "SELECT id, user_id, name, currency, timezone, created_at, updated_at FROM ad_accounts";

/// SQLite-backed implementation of `AdAccountRepository`
pub struct SqliteAdAccountRepository {
    db: Arc<DbManager>,
}

impl SqliteAdAccountRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdAccountRepository for SqliteAdAccountRepository {
    #[instrument(skip(self, accounts), fields(batch = accounts.len()))]
    async fn upsert_accounts(&self, accounts: Vec<AdAccount>) -> DomainResult<usize> {
        if accounts.is_empty() {
            return Ok(0);
        }

        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;
            let written = upsert_batch(&tx, &accounts).map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;

            debug!(written, "ad accounts upserted");
            Ok(written)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<AdAccount>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<AdAccount>> {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!("{SELECT_ACCOUNT_COLUMNS} WHERE id = ?1"),
                params![&id],
                map_account_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<AdAccount>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<AdAccount>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!("{SELECT_ACCOUNT_COLUMNS} WHERE user_id = ?1 ORDER BY name, id"))
                .map_err(map_sql_error)?;

            let accounts = stmt
                .query_map(params![&user_id], map_account_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(accounts)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Returns the number of distinct ids written; a repeated id keeps its last record.
fn upsert_batch(tx: &Transaction<'_>, accounts: &[AdAccount]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare_cached(UPSERT_ACCOUNT_SQL)?;
    let mut written = BTreeSet::new();
    for account in accounts {
        stmt.execute(params![
            &account.id,
            &account.user_id,
            &account.name,
            &account.currency,
            &account.timezone,
            account.created_at,
            account.updated_at,
        ])?;
        written.insert(account.id.as_str());
    }
    Ok(written.len())
}

/// Map a row to an AdAccount
fn map_account_row(row: &Row<'_>) -> rusqlite::Result<AdAccount> {
    Ok(AdAccount {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        currency: row.get(3)?,
        timezone: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
