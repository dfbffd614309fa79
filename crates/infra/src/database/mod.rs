//! Database implementations

pub mod ad_account_repository;
pub mod campaign_repository;
pub mod manager;
pub mod session_repository;
pub mod user_profile_repository;

pub use ad_account_repository::SqliteAdAccountRepository;
pub use campaign_repository::SqliteCampaignRepository;
pub use manager::{DbConnection, DbManager};
pub use session_repository::{hash_token, SqliteSessionRepository};
pub use user_profile_repository::SqliteUserProfileRepository;
