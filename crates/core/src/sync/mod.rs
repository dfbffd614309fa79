//! Account and campaign synchronization
//!
//! Credential Supplier → Upstream Fetcher → Record Transformer →
//! Reconciling Upserter, one page and one batch per invocation.

pub mod credential;
pub mod orchestrator;
pub mod ports;
pub mod service;
pub mod transform;

pub use orchestrator::SyncRun;
pub use transform::{transform_accounts, transform_campaigns, TransformOutcome};
