//! Campaign mirror row

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Delivery status of a campaign, collapsed to three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Archived,
}

impl_domain_status_conversions!(CampaignStatus {
    Active => "ACTIVE",
    Paused => "PAUSED",
    Archived => "ARCHIVED",
});

impl CampaignStatus {
    /// Map an upstream status string.
    ///
    /// Only the exact strings `ACTIVE` and `PAUSED` are recognised; every
    /// other value (`DELETED`, `IN_PROCESS`, empty, missing) becomes
    /// `Archived`.
    pub fn from_upstream(raw: Option<&str>) -> Self {
        match raw {
            Some("ACTIVE") => Self::Active,
            Some("PAUSED") => Self::Paused,
            _ => Self::Archived,
        }
    }
}

/// Campaign as stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Upstream campaign id; conflict key for upserts.
    pub id: String,
    /// Owning ad account (storage key, without `act_`).
    pub account_id: String,
    pub name: String,
    pub status: CampaignStatus,
    /// Daily budget in major currency units.
    pub daily_budget: Option<Decimal>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub objective: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
