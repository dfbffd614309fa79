//! Server utilities

pub mod health;
pub mod logging;
