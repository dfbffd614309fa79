//! Record shapes as returned by the ad-platform API
//!
//! These are decoded one record at a time from the raw `data` array so that a
//! single malformed record can be skipped without losing the batch.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Ad account record from `/me/adaccounts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawAccount {
    /// Upstream id including the `act_` prefix.
    #[serde(deserialize_with = "deserialize_upstream_id")]
    pub id: String,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub timezone_name: Option<String>,
}

/// Campaign record from `/{account}/campaigns`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCampaign {
    #[serde(deserialize_with = "deserialize_upstream_id")]
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    /// Daily budget in minor units (cents).
    #[serde(default, deserialize_with = "deserialize_minor_units")]
    pub daily_budget: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub objective: Option<String>,
}

/// Upstream ids are numeric strings, but numbers are accepted too.
fn deserialize_upstream_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    match Id::deserialize(deserializer)? {
        Id::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(de::Error::custom("id is empty"))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Id::Number(number) => Ok(number.to_string()),
    }
}

/// Minor-unit amounts arrive as integer strings (`"2550"`) or integers.
/// An empty string counts as absent.
fn deserialize_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Integer(i64),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Amount::Integer(value)) => Ok(Some(value)),
        Some(Amount::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(|_| {
                de::Error::custom(format!("daily_budget is not an integer amount: {text}"))
            })
        }
    }
}
