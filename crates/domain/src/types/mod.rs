//! Domain types and models

pub mod account;
pub mod campaign;
pub mod credential;
pub mod sync;
pub mod upstream;
pub mod user;

pub use account::AdAccount;
pub use campaign::{Campaign, CampaignStatus};
pub use credential::Credential;
pub use sync::{SyncEntity, SyncOutcome, SyncPhase, SyncReport};
pub use upstream::{RawAccount, RawCampaign};
pub use user::{Session, UserProfile};
