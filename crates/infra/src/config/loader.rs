//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ADSYNC_DB_PATH` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ADSYNC_DB_PATH`: Database file path (required for env loading)
//! - `ADSYNC_DB_POOL_SIZE`: Connection pool size
//! - `ADSYNC_BIND_ADDR`: HTTP listen address
//! - `ADSYNC_GRAPH_API_BASE`: Graph API host
//! - `ADSYNC_GRAPH_API_VERSION`: Graph API version segment
//! - `ADSYNC_UPSTREAM_TIMEOUT_SECS`: Upstream request deadline in seconds
//!
//! Optional variables fall back to the defaults in
//! `adsync_domain::constants`.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./adsync.json` or `./adsync.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use adsync_domain::{
    AdSyncError, Config, DatabaseConfig, Result, ServerConfig, UpstreamConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AdSyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `AdSyncError::Config` if `ADSYNC_DB_PATH` is missing or any set
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let server_defaults = ServerConfig::default();
    let db_defaults = DatabaseConfig::default();
    let upstream_defaults = UpstreamConfig::default();

    let db_path = env_var("ADSYNC_DB_PATH")?;
    let pool_size = env_parse("ADSYNC_DB_POOL_SIZE", db_defaults.pool_size, "pool size")?;
    let timeout_secs =
        env_parse("ADSYNC_UPSTREAM_TIMEOUT_SECS", upstream_defaults.timeout_secs, "upstream timeout")?;

    Ok(Config {
        server: ServerConfig {
            bind_addr: env_or("ADSYNC_BIND_ADDR", server_defaults.bind_addr),
        },
        database: DatabaseConfig { path: db_path, pool_size },
        upstream: UpstreamConfig {
            base_url: env_or("ADSYNC_GRAPH_API_BASE", upstream_defaults.base_url),
            api_version: env_or("ADSYNC_GRAPH_API_VERSION", upstream_defaults.api_version),
            timeout_secs,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AdSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AdSyncError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AdSyncError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AdSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AdSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AdSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory of
/// the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "adsync.json", "adsync.toml"];

    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .into_iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `AdSyncError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| AdSyncError::Config(format!("Missing required environment variable: {}", key)))
}

/// Optional string variable with a default.
fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).unwrap_or(default)
}

/// Optional parsed variable with a default; a present but invalid value is an
/// error.
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AdSyncError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}
