//! Ad account mirror row

use serde::{Deserialize, Serialize};

/// Ad account as stored locally.
///
/// `id` is the upstream account id with the `act_` prefix removed; it is the
/// conflict key for upserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: String,
    /// Local user the account was synced for.
    pub user_id: String,
    pub name: Option<String>,
    /// ISO 4217 code as reported upstream.
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
