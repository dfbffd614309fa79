//! Campaign repository implementation using SQLite
//!
//! Every campaign in a batch must point at an account already in the store.
//! The check and the writes share one transaction, so an orphan leaves the
//! table untouched.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use adsync_core::CampaignRepository;
use adsync_domain::{AdSyncError, Campaign, CampaignStatus, Result as DomainResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

const UPSERT_CAMPAIGN_SQL: &str = "INSERT INTO campaigns (
        id, account_id, name, status, daily_budget, start_time, end_time,
        objective, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(id) DO UPDATE SET
        account_id = excluded.account_id,
        name = excluded.name,
        status = excluded.status,
        daily_budget = excluded.daily_budget,
        start_time = excluded.start_time,
        end_time = excluded.end_time,
        objective = excluded.objective,
        updated_at = excluded.updated_at";

/// SQLite-backed implementation of `CampaignRepository`
pub struct SqliteCampaignRepository {
    db: Arc<DbManager>,
}

impl SqliteCampaignRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CampaignRepository for SqliteCampaignRepository {
    #[instrument(skip(self, campaigns), fields(batch = campaigns.len()))]
    async fn upsert_campaigns(&self, campaigns: Vec<Campaign>) -> DomainResult<usize> {
        if campaigns.is_empty() {
            return Ok(0);
        }

        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            ensure_owners_exist(&tx, &campaigns)?;
            let written = upsert_batch(&tx, &campaigns).map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;

            debug!(written, "campaigns upserted");
            Ok(written)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }

    async fn list_by_account(&self, account_id: &str) -> DomainResult<Vec<Campaign>> {
        let db = Arc::clone(&self.db);
        let account_id = account_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Campaign>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, account_id, name, status, daily_budget, start_time, end_time,
                            objective, created_at, updated_at
                     FROM campaigns
                     WHERE account_id = ?1
                     ORDER BY created_at DESC, id",
                )
                .map_err(map_sql_error)?;

            let campaigns = stmt
                .query_map(params![&account_id], map_campaign_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(campaigns)
        })
        .await
        .map_err(|err| InfraError::from(err).0)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reject the batch if any record lacks an owner or names an unknown account.
fn ensure_owners_exist(tx: &Transaction<'_>, campaigns: &[Campaign]) -> DomainResult<()> {
    if let Some(campaign) = campaigns.iter().find(|c| c.account_id.trim().is_empty()) {
        return Err(AdSyncError::OrphanRecord(format!(
            "campaign {} has no owning ad account",
            campaign.id
        )));
    }

    let owners: BTreeSet<&str> = campaigns.iter().map(|c| c.account_id.as_str()).collect();
    let mut stmt =
        tx.prepare_cached("SELECT 1 FROM ad_accounts WHERE id = ?1").map_err(map_sql_error)?;

    for owner in owners {
        let exists =
            stmt.query_row(params![owner], |_| Ok(())).optional().map_err(map_sql_error)?.is_some();
        if !exists {
            warn!(account_id = owner, "campaign batch references unknown ad account");
            return Err(AdSyncError::OrphanRecord(format!(
                "ad account {owner} is not in the store; sync ad accounts first"
            )));
        }
    }

    Ok(())
}

/// Returns the number of distinct ids written; a repeated id keeps its last record.
fn upsert_batch(tx: &Transaction<'_>, campaigns: &[Campaign]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare_cached(UPSERT_CAMPAIGN_SQL)?;
    let mut written = BTreeSet::new();
    for campaign in campaigns {
        stmt.execute(params![
            &campaign.id,
            &campaign.account_id,
            &campaign.name,
            campaign.status.as_str(),
            campaign.daily_budget.map(|budget| budget.to_string()),
            &campaign.start_time,
            &campaign.end_time,
            &campaign.objective,
            campaign.created_at,
            campaign.updated_at,
        ])?;
        written.insert(campaign.id.as_str());
    }
    Ok(written.len())
}

/// Map a row to a Campaign
fn map_campaign_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    let status: String = row.get(3)?;
    let status = CampaignStatus::from_str(&status).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, err.into())
    })?;

    let daily_budget = row
        .get::<_, Option<String>>(4)?
        .map(|text| Decimal::from_str(&text))
        .transpose()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err)))?;

    Ok(Campaign {
        id: row.get(0)?,
        account_id: row.get(1)?,
        name: row.get(2)?,
        status,
        daily_budget,
        start_time: row.get(5)?,
        end_time: row.get(6)?,
        objective: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
