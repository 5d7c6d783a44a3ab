//! Refresh-token ledger over the key-value store.

use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use proctor_cache::keys;
use proctor_cache::provider::CacheManager;
use proctor_core::traits::CacheProvider;

use crate::error::CredentialError;

/// Records which refresh tokens are outstanding.
///
/// One entry per issued refresh token, keyed by the raw token string,
/// valued by its subject. Presence of the key is the sole authority for
/// "still valid and unused". Store failures surface as
/// [`CredentialError::StoreUnavailable`] and are never read as absence.
#[derive(Debug, Clone)]
pub struct RefreshLedger {
    cache: Arc<CacheManager>,
}

impl RefreshLedger {
    /// Creates a ledger on top of the given store.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Writes the entry for a newly issued refresh token.
    pub async fn record(
        &self,
        token: &str,
        subject: &str,
        ttl: Duration,
    ) -> Result<(), CredentialError> {
        self.cache
            .set(&keys::refresh_token(token), subject, ttl)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to record refresh token");
                CredentialError::StoreUnavailable
            })
    }

    /// Atomically removes the entry and returns its subject.
    ///
    /// Returns `Ok(None)` when the token was never recorded, already
    /// redeemed, or expired.
    pub async fn redeem(&self, token: &str) -> Result<Option<String>, CredentialError> {
        self.cache
            .take(&keys::refresh_token(token))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to redeem refresh token");
                CredentialError::StoreUnavailable
            })
    }

    /// Whether the token currently has an entry.
    pub async fn is_outstanding(&self, token: &str) -> Result<bool, CredentialError> {
        self.cache
            .exists(&keys::refresh_token(token))
            .await
            .map_err(|_| CredentialError::StoreUnavailable)
    }
}
