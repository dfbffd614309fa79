//! Local user and session types
//!
//! Users are created by the external login flow; the sync core only reads
//! them and stores the upstream credential on the profile.

use serde::{Deserialize, Serialize};

/// User profile stored in local database
///
/// The stored upstream credential is intentionally not a field here; it is
/// read and written through dedicated repository methods only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller session resolved from the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub expires_at: i64,
}
