//! Shared test helpers for `adsync-core` integration tests.
//!
//! In-memory stand-ins for the store and a scripted upstream client, so the
//! sync tests can focus on pipeline behaviour instead of infrastructure.

#![allow(dead_code)]

pub mod client;
pub mod repositories;
