//! Credential supplier
//!
//! Resolves the upstream bearer credential for one sync invocation. Reads the
//! local profile store at most; never touches the network.

use std::sync::Arc;

use adsync_domain::{AdSyncError, Credential, Result};
use tracing::debug;

use crate::user::ports::UserProfileRepository;

/// Where the caller wants the credential to come from.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    /// Token supplied with the request, possibly blank.
    pub supplied: Option<String>,
    /// Fall back to the token stored on the caller's profile when nothing
    /// usable was supplied.
    pub use_stored: bool,
}

impl CredentialRequest {
    /// Request that only accepts the supplied token.
    pub fn supplied(token: impl Into<String>) -> Self {
        Self { supplied: Some(token.into()), use_stored: false }
    }
}

impl std::fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("supplied", &self.supplied.as_ref().map(|_| "***"))
            .field("use_stored", &self.use_stored)
            .finish()
    }
}

/// Resolves a [`Credential`] from a request, optionally falling back to the
/// profile store.
#[derive(Clone)]
pub struct CredentialSupplier {
    profiles: Arc<dyn UserProfileRepository>,
}

impl CredentialSupplier {
    pub fn new(profiles: Arc<dyn UserProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Resolve the credential for `user_id`.
    ///
    /// A non-blank supplied token always wins. The stored token is consulted
    /// only when `use_stored` is set and a user is known.
    pub async fn supply(
        &self,
        request: &CredentialRequest,
        user_id: Option<&str>,
    ) -> Result<Credential> {
        if let Ok(credential) = resolve_supplied(request.supplied.as_deref()) {
            return Ok(credential);
        }

        if request.use_stored {
            if let Some(user_id) = user_id {
                if let Some(stored) = self.profiles.get_access_token(user_id).await? {
                    debug!(user_id, "using stored upstream credential");
                    return Ok(stored);
                }
            }
        }

        Err(AdSyncError::MissingCredential)
    }
}

/// Resolve a caller-supplied token without any fallback.
pub fn resolve_supplied(raw: Option<&str>) -> Result<Credential> {
    raw.and_then(Credential::parse).ok_or(AdSyncError::MissingCredential)
}
