//! Authentication configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days. Also the TTL of its ledger entry.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn strength score (0-4) accepted at registration.
    #[serde(default = "default_password_min_score")]
    pub password_min_score: u8,
    /// Clock skew tolerance in seconds when checking expiry.
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_min_score: default_password_min_score(),
            leeway_seconds: 0,
        }
    }
}

impl AuthConfig {
    /// Access token lifetime. Fails unless it is positive and representable.
    pub fn access_ttl(&self) -> Result<Duration, AppError> {
        positive_ttl("auth.access_ttl_minutes", self.access_ttl_minutes, Duration::try_minutes)
    }

    /// Refresh token lifetime. Fails unless it is positive and representable.
    pub fn refresh_ttl(&self) -> Result<Duration, AppError> {
        positive_ttl("auth.refresh_ttl_days", self.refresh_ttl_days, Duration::try_days)
    }

    /// Checks the settings that would otherwise only fail at first login.
    pub fn validate(&self) -> Result<(), AppError> {
        self.access_ttl()?;
        self.refresh_ttl()?;
        Ok(())
    }
}

fn positive_ttl(
    key: &str,
    value: u64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Duration, AppError> {
    i64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .and_then(to_duration)
        .ok_or_else(|| {
            AppError::configuration(format!("{key} must be positive and in range, got {value}"))
        })
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

fn default_password_min_score() -> u8 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_ttl().unwrap(), Duration::minutes(15));
        assert_eq!(config.refresh_ttl().unwrap(), Duration::days(7));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let config = AuthConfig {
            access_ttl_minutes: 0,
            ..AuthConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert!(err.message.contains("access_ttl_minutes"));
    }

    #[test]
    fn test_out_of_range_ttl_is_rejected() {
        let huge_access = AuthConfig {
            access_ttl_minutes: u64::MAX,
            ..AuthConfig::default()
        };
        assert!(huge_access.access_ttl().is_err());

        let huge_refresh = AuthConfig {
            refresh_ttl_days: i64::MAX as u64,
            ..AuthConfig::default()
        };
        assert!(huge_refresh.refresh_ttl().is_err());
    }
}
