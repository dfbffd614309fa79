//! # AdSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the upstream API and the store
//! - The credential supplier and record transformer
//! - The per-entity sync orchestrators
//!
//! ## Architecture Principles
//! - Only depends on `adsync-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod sync;
pub mod user;

// Re-export specific items to avoid ambiguity
pub use sync::credential::{CredentialRequest, CredentialSupplier};
pub use sync::ports::{AdAccountRepository, AdPlatformClient, CampaignRepository};
pub use sync::service::{
    AccountSyncRequest, AccountSyncService, CampaignSyncRequest, CampaignSyncService,
};
pub use user::ports::{SessionRepository, UserProfileRepository};
