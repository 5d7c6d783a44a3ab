//! Password policy enforcement for new passwords.

use proctor_core::config::AuthConfig;
use proctor_core::error::AppError;
use zxcvbn::Score;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: score_from(config.password_min_score),
        }
    }

    /// Validates a password, returning the first violation found.
    ///
    /// `user_inputs` (email, name) are penalised by the entropy estimate.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less predictable password.",
            ));
        }

        Ok(())
    }
}

fn score_from(n: u8) -> Score {
    match n {
        0 => Score::Zero,
        1 => Score::One,
        2 => Score::Two,
        3 => Score::Three,
        _ => Score::Four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_too_short() {
        let err = validator().validate("abc", &[]).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_common_password_is_weak() {
        assert!(validator().validate("password", &[]).is_err());
    }

    #[test]
    fn test_user_inputs_are_penalised() {
        let v = PasswordValidator::new(&AuthConfig {
            password_min_score: 3,
            ..AuthConfig::default()
        });
        assert!(v.validate("alice.smith", &["alice.smith"]).is_err());
    }

    #[test]
    fn test_strong_passphrase_passes() {
        assert!(validator().validate("violet-tundra-92-ledger", &[]).is_ok());
    }
}
