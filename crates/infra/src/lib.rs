//! # AdSync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for accounts, campaigns, profiles and sessions
//! - The HTTP client and the Meta Graph API fetcher
//! - Configuration loading
//! - Conversions from driver errors into `AdSyncError`
//!
//! ## Architecture
//! - Implements traits defined in `adsync-core`
//! - Depends on `adsync-domain` and `adsync-core`
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use integrations::meta::GraphApiClient;
