//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AdSync
///
/// The `Display` output of every variant is what the HTTP layer returns to
/// callers as the `error` string, so messages must stay free of secrets.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AdSyncError {
    #[error("Missing access token")]
    MissingCredential,

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A single upstream record could not be coerced. Absorbed and counted by
    /// the transformer, never fatal to a batch.
    #[error("Invalid upstream record: {0}")]
    InvalidUpstreamRecord(String),

    #[error("Orphan record: {0}")]
    OrphanRecord(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for AdSync operations
pub type Result<T> = std::result::Result<T, AdSyncError>;
