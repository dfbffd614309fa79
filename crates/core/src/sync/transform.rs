//! Record transformer
//!
//! Pure conversion from upstream JSON records into local rows. A record that
//! cannot be coerced is logged, counted and skipped; it never aborts the
//! batch.

use adsync_domain::constants::{ACCOUNT_ID_PREFIX, MINOR_UNIT_SCALE};
use adsync_domain::{
    AdAccount, AdSyncError, Campaign, CampaignStatus, RawAccount, RawCampaign, Result, SyncEntity,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Rows produced from one upstream page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome<T> {
    pub records: Vec<T>,
    /// Number of malformed records that were skipped.
    pub skipped: usize,
}

/// Transform a page of upstream ad accounts for `user_id`.
pub fn transform_accounts(raw: Vec<Value>, user_id: &str, now: i64) -> TransformOutcome<AdAccount> {
    transform_page(raw, SyncEntity::AdAccounts, |value| {
        let record: RawAccount = decode(value)?;
        transform_account(record, user_id, now)
    })
}

/// Transform a page of upstream campaigns owned by `account_id`.
pub fn transform_campaigns(raw: Vec<Value>, account_id: &str, now: i64) -> TransformOutcome<Campaign> {
    transform_page(raw, SyncEntity::Campaigns, |value| {
        let record: RawCampaign = decode(value)?;
        Ok(transform_campaign(record, account_id, now))
    })
}

/// Map one decoded account to its local row.
pub fn transform_account(raw: RawAccount, user_id: &str, now: i64) -> Result<AdAccount> {
    let id = strip_account_prefix(&raw.id);
    if id.is_empty() {
        return Err(AdSyncError::InvalidUpstreamRecord(format!(
            "account id '{}' has nothing after the prefix",
            raw.id
        )));
    }

    Ok(AdAccount {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: raw.name,
        currency: raw.currency,
        timezone: raw.timezone_name,
        created_at: now,
        updated_at: now,
    })
}

/// Map one decoded campaign to its local row.
pub fn transform_campaign(raw: RawCampaign, account_id: &str, now: i64) -> Campaign {
    Campaign {
        id: raw.id,
        account_id: account_id.to_string(),
        name: raw.name,
        status: CampaignStatus::from_upstream(raw.status.as_deref()),
        daily_budget: raw.daily_budget.map(minor_to_major),
        start_time: raw.start_time,
        end_time: raw.end_time,
        objective: raw.objective,
        created_at: now,
        updated_at: now,
    }
}

/// Convert minor units (cents) to major units: `2550` becomes `25.50`.
pub fn minor_to_major(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

/// Remove the upstream `act_` prefix if present.
pub fn strip_account_prefix(id: &str) -> &str {
    id.strip_prefix(ACCOUNT_ID_PREFIX).unwrap_or(id)
}

/// Validate a caller-supplied ad account id and return its storage key.
///
/// Accepts `act_<digits>` or bare `<digits>`.
pub fn normalize_account_id(raw: &str) -> Result<String> {
    let key = strip_account_prefix(raw.trim());
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AdSyncError::InvalidInput(format!("invalid ad account id: '{raw}'")));
    }
    Ok(key.to_string())
}

fn transform_page<T, F>(raw: Vec<Value>, entity: SyncEntity, mut convert: F) -> TransformOutcome<T>
where
    F: FnMut(Value) -> Result<T>,
{
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (index, value) in raw.into_iter().enumerate() {
        match convert(value) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                warn!(%entity, index, error = %err, "skipping malformed upstream record");
            }
        }
    }

    TransformOutcome { records, skipped }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| AdSyncError::InvalidUpstreamRecord(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn account_prefix_is_stripped() {
        let outcome = transform_accounts(
            vec![json!({
                "id": "act_123456",
                "name": "Main",
                "currency": "USD",
                "timezone_name": "America/Los_Angeles"
            })],
            "user-1",
            NOW,
        );

        assert_eq!(outcome.skipped, 0);
        let account = &outcome.records[0];
        assert_eq!(account.id, "123456");
        assert_eq!(account.user_id, "user-1");
        assert_eq!(account.name.as_deref(), Some("Main"));
        assert_eq!(account.currency.as_deref(), Some("USD"));
        assert_eq!(account.timezone.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(account.updated_at, NOW);
    }

    #[test]
    fn account_without_prefix_passes_through() {
        let outcome = transform_accounts(vec![json!({ "id": "987" })], "user-1", NOW);
        assert_eq!(outcome.records[0].id, "987");
    }

    #[test]
    fn bare_prefix_account_is_skipped() {
        let outcome = transform_accounts(vec![json!({ "id": "act_" })], "user-1", NOW);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn malformed_records_are_counted_not_fatal() {
        let outcome = transform_accounts(
            vec![
                json!({ "id": "act_1", "name": "ok" }),
                json!("not an object"),
                json!({ "name": "missing id" }),
                json!({ "id": "act_2", "currency": 840 }),
                json!({ "id": "act_3" }),
            ],
            "user-1",
            NOW,
        );

        let ids: Vec<_> = outcome.records.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(outcome.skipped, 3);
    }

    #[test]
    fn campaign_budget_is_converted_to_major_units() {
        let outcome = transform_campaigns(
            vec![
                json!({ "id": "c1", "name": "With budget", "status": "ACTIVE", "daily_budget": "2550" }),
                json!({ "id": "c2", "name": "No budget", "status": "PAUSED", "daily_budget": null }),
                json!({ "id": "c3", "name": "Missing budget" }),
            ],
            "42",
            NOW,
        );

        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records[0].daily_budget, Some(Decimal::from_str("25.50").unwrap()));
        assert_eq!(outcome.records[0].daily_budget.unwrap().to_string(), "25.50");
        assert_eq!(outcome.records[1].daily_budget, None);
        assert_eq!(outcome.records[2].daily_budget, None);
    }

    #[test]
    fn campaign_status_defaults_to_archived() {
        let outcome = transform_campaigns(
            vec![
                json!({ "id": "1", "name": "a", "status": "ACTIVE" }),
                json!({ "id": "2", "name": "b", "status": "PAUSED" }),
                json!({ "id": "3", "name": "c", "status": "DELETED" }),
                json!({ "id": "4", "name": "d", "status": "" }),
                json!({ "id": "5", "name": "e" }),
            ],
            "42",
            NOW,
        );

        let statuses: Vec<_> = outcome.records.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                CampaignStatus::Active,
                CampaignStatus::Paused,
                CampaignStatus::Archived,
                CampaignStatus::Archived,
                CampaignStatus::Archived,
            ]
        );
    }

    #[test]
    fn campaign_passes_through_times_and_objective() {
        let outcome = transform_campaigns(
            vec![json!({
                "id": "120200000001",
                "name": "Spring",
                "status": "ACTIVE",
                "start_time": "2024-03-01T00:00:00-0800",
                "end_time": "2024-03-31T23:59:59-0700",
                "objective": "OUTCOME_TRAFFIC"
            })],
            "42",
            NOW,
        );

        let campaign = &outcome.records[0];
        assert_eq!(campaign.account_id, "42");
        assert_eq!(campaign.start_time.as_deref(), Some("2024-03-01T00:00:00-0800"));
        assert_eq!(campaign.end_time.as_deref(), Some("2024-03-31T23:59:59-0700"));
        assert_eq!(campaign.objective.as_deref(), Some("OUTCOME_TRAFFIC"));
        assert_eq!(campaign.created_at, NOW);
    }

    #[test]
    fn campaign_with_bad_budget_or_no_name_is_skipped() {
        let outcome = transform_campaigns(
            vec![
                json!({ "id": "1", "name": "ok", "daily_budget": 100 }),
                json!({ "id": "2", "name": "fractional", "daily_budget": "10.5" }),
                json!({ "id": "3" }),
            ],
            "42",
            NOW,
        );

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].daily_budget.unwrap().to_string(), "1.00");
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn minor_to_major_keeps_two_decimals() {
        assert_eq!(minor_to_major(2550).to_string(), "25.50");
        assert_eq!(minor_to_major(0).to_string(), "0.00");
        assert_eq!(minor_to_major(7).to_string(), "0.07");
    }

    #[test]
    fn normalize_account_id_accepts_both_forms() {
        assert_eq!(normalize_account_id("act_123456").unwrap(), "123456");
        assert_eq!(normalize_account_id("123456").unwrap(), "123456");
        assert_eq!(normalize_account_id(" act_9 ").unwrap(), "9");
    }

    #[test]
    fn normalize_account_id_rejects_garbage() {
        for raw in ["", "act_", "act_12a", "../me", "12 34"] {
            assert!(
                matches!(normalize_account_id(raw), Err(AdSyncError::InvalidInput(_))),
                "expected rejection for {raw:?}"
            );
        }
    }
}
