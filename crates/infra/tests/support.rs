#![allow(dead_code)]

use std::sync::Arc;

use adsync_core::{AdAccountRepository, UserProfileRepository};
use adsync_domain::{AdAccount, UserProfile};
use adsync_infra::database::{DbManager, SqliteAdAccountRepository, SqliteUserProfileRepository};
use tempfile::TempDir;

pub const NOW: i64 = 1_700_000_000;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Count rows of a table.
    pub fn count(&self, table: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count query should succeed")
    }

    /// Raw single-column text read, for asserting on-disk representation.
    pub fn text(&self, sql: &str) -> Option<String> {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(sql, [], |row| row.get(0)).expect("text query should succeed")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn account(id: &str, user_id: &str, name: &str) -> AdAccount {
    AdAccount {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: Some(name.to_string()),
        currency: Some("USD".to_string()),
        timezone: Some("UTC".to_string()),
        created_at: NOW,
        updated_at: NOW,
    }
}

pub fn profile(id: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        created_at: NOW,
        updated_at: NOW,
    }
}

/// Insert a profile row.
pub async fn seed_profile(db: &TestDatabase, id: &str) {
    SqliteUserProfileRepository::new(Arc::clone(&db.manager))
        .upsert(profile(id))
        .await
        .expect("profile should be stored");
}

/// Insert account rows.
pub async fn seed_accounts(db: &TestDatabase, accounts: Vec<AdAccount>) {
    SqliteAdAccountRepository::new(Arc::clone(&db.manager))
        .upsert_accounts(accounts)
        .await
        .expect("accounts should be stored");
}
