//! User profile and session ports

pub mod ports;
