//! Credential lifecycle manager: login issuance, refresh rotation, and
//! access validation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use proctor_cache::provider::CacheManager;
use proctor_core::config::AuthConfig;
use proctor_core::error::AppError;
use proctor_core::traits::Clock;

use crate::error::CredentialError;
use crate::jwt::{Claims, TokenCodec, TokenKind};

use super::ledger::RefreshLedger;

/// An access token and the refresh token that can replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived, single-use refresh token.
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues access/refresh pairs and rotates refresh tokens exactly once.
///
/// Rotation order is fixed: the old ledger entry is removed (atomic take)
/// before the new pair is signed and recorded. A store failure at any step
/// is reported as [`CredentialError::StoreUnavailable`].
#[derive(Clone)]
pub struct CredentialManager {
    codec: TokenCodec,
    ledger: RefreshLedger,
    clock: Arc<dyn Clock>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    leeway_seconds: u64,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl CredentialManager {
    /// Creates a manager from auth configuration.
    ///
    /// Fails with a configuration error when a token lifetime is zero or
    /// out of range.
    pub fn new(
        config: &AuthConfig,
        cache: Arc<CacheManager>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            codec: TokenCodec::new(&config.jwt_secret),
            ledger: RefreshLedger::new(cache),
            clock,
            access_ttl: config.access_ttl()?,
            refresh_ttl: config.refresh_ttl()?,
            leeway_seconds: config.leeway_seconds,
        })
    }

    /// Returns the underlying codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Returns the refresh ledger.
    pub fn ledger(&self) -> &RefreshLedger {
        &self.ledger
    }

    /// Issues a fresh pair for `subject` and records the refresh token.
    pub async fn issue(&self, subject: &str) -> Result<TokenPair, CredentialError> {
        let now = self.clock.now();
        let access = self
            .codec
            .issue(subject, TokenKind::Access, now, self.access_ttl)?;
        let refresh = self
            .codec
            .issue(subject, TokenKind::Refresh, now, self.refresh_ttl)?;

        let ledger_ttl = self
            .refresh_ttl
            .to_std()
            .map_err(|e| CredentialError::Encoding(e.to_string()))?;
        self.ledger
            .record(&refresh.token, subject, ledger_ttl)
            .await?;

        debug!(subject, "Issued credential pair");

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "bearer".to_string(),
            access_expires_at: access.claims.expires_at(),
            refresh_expires_at: refresh.claims.expires_at(),
        })
    }

    /// Exchanges a refresh token for a new pair. Succeeds at most once per token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, CredentialError> {
        let claims = self
            .codec
            .verify(refresh_token)
            .map_err(|_| CredentialError::InvalidRefresh)?;

        if claims.kind != TokenKind::Refresh {
            return Err(CredentialError::InvalidRefresh);
        }
        if claims.is_expired_at(self.clock.now(), self.leeway_seconds) {
            return Err(CredentialError::InvalidRefresh);
        }

        match self.ledger.redeem(refresh_token).await? {
            Some(subject) if subject == claims.sub => {}
            Some(subject) => {
                warn!(
                    token_subject = %claims.sub,
                    ledger_subject = %subject,
                    "Refresh ledger subject mismatch"
                );
                return Err(CredentialError::RevokedOrExpired);
            }
            None => {
                warn!(subject = %claims.sub, jti = %claims.jti, "Refresh token reuse or expiry");
                return Err(CredentialError::RevokedOrExpired);
            }
        }

        let pair = self.issue(&claims.sub).await?;
        info!(subject = %claims.sub, "Refresh token rotated");
        Ok(pair)
    }

    /// Validates an access token: signature, kind, then expiry.
    ///
    /// Does not consult the ledger.
    pub fn authenticate_access(&self, access_token: &str) -> Result<Claims, CredentialError> {
        let claims = self.codec.verify(access_token)?;

        if claims.kind != TokenKind::Access {
            return Err(CredentialError::WrongKind);
        }
        if claims.is_expired_at(self.clock.now(), self.leeway_seconds) {
            return Err(CredentialError::Expired);
        }

        Ok(claims)
    }
}
