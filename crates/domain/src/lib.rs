//! # AdSync Domain
//!
//! Business domain types and models for AdSync.
//!
//! This crate contains:
//! - Mirrored entities (`AdAccount`, `Campaign`) and their upstream shapes
//! - The sync error taxonomy and Result alias
//! - Configuration structures
//! - Domain constants (upstream field sets, id prefix, defaults)
//!
//! ## Architecture
//! - No dependencies on other AdSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
