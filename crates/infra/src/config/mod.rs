//! Configuration loading
//!
//! Environment variables (`ADSYNC_*`) take precedence; a probed
//! `config.{json,toml}` / `adsync.{json,toml}` file is the fallback.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
