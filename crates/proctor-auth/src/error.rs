//! Credential failure taxonomy.

use proctor_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Every way a credential operation can fail.
///
/// All variants except [`CredentialError::StoreUnavailable`] and
/// [`CredentialError::Encoding`] mean "unauthenticated" and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The signature does not match the payload.
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The token is not a well-formed signed credential.
    #[error("Malformed token")]
    MalformedToken,
    /// The token verified but its lifetime is over.
    #[error("Token has expired")]
    Expired,
    /// An access token was expected but another kind was presented.
    #[error("Wrong token type")]
    WrongKind,
    /// The presented refresh token failed verification, kind, or expiry checks.
    #[error("Invalid refresh token")]
    InvalidRefresh,
    /// The refresh token verified but has no ledger entry.
    #[error("Refresh token revoked or expired")]
    RevokedOrExpired,
    /// The ledger could not be read or written.
    #[error("Credential store unavailable")]
    StoreUnavailable,
    /// Signing a new token failed.
    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

impl CredentialError {
    /// Machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::Expired => "EXPIRED",
            Self::WrongKind => "WRONG_KIND",
            Self::InvalidRefresh => "INVALID_REFRESH",
            Self::RevokedOrExpired => "REVOKED_OR_EXPIRED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Encoding(_) => "ENCODING",
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        let kind = match err {
            CredentialError::StoreUnavailable => ErrorKind::ServiceUnavailable,
            CredentialError::Encoding(_) => ErrorKind::Internal,
            _ => ErrorKind::Authentication,
        };
        AppError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_are_authentication_errors() {
        for err in [
            CredentialError::InvalidSignature,
            CredentialError::MalformedToken,
            CredentialError::Expired,
            CredentialError::WrongKind,
            CredentialError::InvalidRefresh,
            CredentialError::RevokedOrExpired,
        ] {
            assert_eq!(AppError::from(err).kind, ErrorKind::Authentication);
        }
    }

    #[test]
    fn test_store_unavailable_fails_closed() {
        let app: AppError = CredentialError::StoreUnavailable.into();
        assert_eq!(app.kind, ErrorKind::ServiceUnavailable);
    }
}
