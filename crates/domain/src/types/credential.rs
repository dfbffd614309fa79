//! Upstream bearer credential

use std::fmt;

/// Bearer token for the ad-platform API.
///
/// Deliberately implements neither `Display` nor `Serialize`; `Debug` is
/// redacted so the value cannot end up in logs through `?` formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from raw input. Surrounding whitespace is trimmed;
    /// blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The token itself, for the `Authorization` header or the credential
    /// column only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
