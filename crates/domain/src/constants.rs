//! Application constants
//!
//! Centralized location for the upstream contract and the defaults used when
//! no configuration overrides them.

// Upstream (Meta Graph API) contract
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com";
pub const DEFAULT_GRAPH_API_VERSION: &str = "v18.0";
pub const AD_ACCOUNT_FIELDS: &str = "id,name,currency,timezone_name";
pub const CAMPAIGN_FIELDS: &str = "id,name,status,daily_budget,start_time,end_time,objective";

/// Prefix the upstream puts in front of ad account ids (`act_123456`).
pub const ACCOUNT_ID_PREFIX: &str = "act_";

/// Upstream budgets are reported in minor units (cents): two decimal places.
pub const MINOR_UNIT_SCALE: u32 = 2;

// Runtime defaults
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_DB_PATH: &str = "adsync.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("adsync/", env!("CARGO_PKG_VERSION"));
