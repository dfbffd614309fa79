//! # AdSync Server
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - axum routes (caller → sync core bridge)
//! - Application context (dependency injection)
//! - Logging bootstrap and structured sync events
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Resolves the caller's session before invoking the sync services

pub mod context;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use routes::router;
