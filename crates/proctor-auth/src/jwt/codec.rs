//! Credential codec: one secret, issue and verify.

use chrono::{DateTime, Duration, Utc};

use crate::error::CredentialError;

use super::claims::{Claims, TokenKind};
use super::decoder::JwtDecoder;
use super::encoder::{IssuedToken, JwtEncoder};

/// Issues and verifies HS256 compact tokens.
///
/// Makes no network or store calls and applies no expiry policy.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenCodec {
    /// Creates a codec bound to `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoder: JwtEncoder::new(secret.as_bytes()),
            decoder: JwtDecoder::new(secret.as_bytes()),
        }
    }

    /// Signs a token of `kind` for `subject`.
    pub fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<IssuedToken, CredentialError> {
        self.encoder.issue(subject, kind, issued_at, ttl)
    }

    /// Verifies `token` and returns its claims unchanged.
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        self.decoder.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-that-is-long-enough")
    }

    #[test]
    fn test_verify_returns_issued_fields() {
        let codec = codec();
        let now = Utc::now();
        let issued = codec
            .issue("alice", TokenKind::Access, now, Duration::minutes(15))
            .unwrap();

        let claims = codec.verify(&issued.token).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 15 * 60);
    }

    #[test]
    fn test_same_second_tokens_differ() {
        let codec = codec();
        let now = Utc::now();
        let a = codec
            .issue("alice", TokenKind::Refresh, now, Duration::days(7))
            .unwrap();
        let b = codec
            .issue("alice", TokenKind::Refresh, now, Duration::days(7))
            .unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_expired_token_still_verifies() {
        let codec = codec();
        let long_ago = Utc::now() - Duration::days(30);
        let issued = codec
            .issue("alice", TokenKind::Access, long_ago, Duration::minutes(15))
            .unwrap();
        assert!(codec.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_any_bit_flip_is_rejected() {
        let codec = codec();
        let issued = codec
            .issue("alice", TokenKind::Access, Utc::now(), Duration::minutes(15))
            .unwrap();
        let bytes = issued.token.as_bytes();

        for i in 0..bytes.len() {
            for bit in 0..7 {
                let mut tampered = bytes.to_vec();
                tampered[i] ^= 1 << bit;
                let Ok(tampered) = String::from_utf8(tampered) else {
                    continue;
                };
                let result = codec.verify(&tampered);
                assert!(
                    matches!(
                        result,
                        Err(CredentialError::InvalidSignature | CredentialError::MalformedToken)
                    ),
                    "byte {i} bit {bit} was accepted"
                );
            }
        }
    }

    #[test]
    fn test_foreign_secret_is_invalid_signature() {
        let issued = TokenCodec::new("other-secret")
            .issue("alice", TokenKind::Access, Utc::now(), Duration::minutes(15))
            .unwrap();
        assert_eq!(
            codec().verify(&issued.token),
            Err(CredentialError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(
            codec().verify("not-a-token"),
            Err(CredentialError::MalformedToken)
        );
        assert_eq!(codec().verify(""), Err(CredentialError::MalformedToken));
    }

    #[test]
    fn test_non_positive_ttl_is_refused() {
        let result = codec().issue("alice", TokenKind::Access, Utc::now(), Duration::zero());
        assert!(matches!(result, Err(CredentialError::Encoding(_))));
    }
}
