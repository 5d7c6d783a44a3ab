//! JWT claims carried by access and refresh tokens.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID as a string.
    pub sub: String,
    /// Access or refresh.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Random token id; keeps same-second tokens distinct.
    pub jti: Uuid,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived, single-use token exchanged for a new pair.
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

impl Claims {
    /// Returns the issued-at instant.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the expiration instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the token is expired at `now`, allowing `leeway_seconds` of skew.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: u64) -> bool {
        now.timestamp() >= self.exp.saturating_add(leeway_seconds as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_under_type() {
        let claims = Claims {
            sub: "alice".to_string(),
            kind: TokenKind::Refresh,
            iat: 100,
            exp: 200,
            jti: Uuid::nil(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims {
            sub: "alice".to_string(),
            kind: TokenKind::Access,
            iat: 100,
            exp: 200,
            jti: Uuid::nil(),
        };
        let at = |s| DateTime::from_timestamp(s, 0).unwrap();
        assert!(!claims.is_expired_at(at(199), 0));
        assert!(claims.is_expired_at(at(200), 0));
        assert!(!claims.is_expired_at(at(200), 5));
    }
}
