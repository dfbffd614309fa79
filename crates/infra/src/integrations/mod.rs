//! External service integrations

pub mod meta;
