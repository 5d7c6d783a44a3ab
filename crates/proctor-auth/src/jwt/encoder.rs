//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use crate::error::CredentialError;

use super::claims::{Claims, TokenKind};

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWT string.
    pub token: String,
    /// Claims that were signed.
    pub claims: Claims,
}

/// Signs tokens with an HMAC-SHA256 secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    header: Header,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("alg", &self.header.alg)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder for the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Signs a token for `subject` valid from `issued_at` for `ttl`.
    ///
    /// Pure apart from drawing a random `jti`. `ttl` must be positive.
    pub fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<IssuedToken, CredentialError> {
        if ttl <= Duration::zero() {
            return Err(CredentialError::Encoding(
                "token lifetime must be positive".to_string(),
            ));
        }

        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            kind,
            iat,
            exp: iat + ttl.num_seconds().max(1),
            jti: Uuid::new_v4(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}
