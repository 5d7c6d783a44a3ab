//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a participant can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Sits exams and may raise alerts on their own sessions.
    Student,
    /// Creates and supervises exam sessions.
    Invigilator,
}

impl UserRole {
    /// Check if this role supervises exams.
    pub fn is_invigilator(&self) -> bool {
        matches!(self, Self::Invigilator)
    }

    /// Return the role as its wire/database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Invigilator => "INVIGILATOR",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = proctor_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STUDENT" => Ok(Self::Student),
            "INVIGILATOR" => Ok(Self::Invigilator),
            _ => Err(proctor_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, invigilator"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("student".parse::<UserRole>().unwrap(), UserRole::Student);
        assert_eq!(
            "INVIGILATOR".parse::<UserRole>().unwrap(),
            UserRole::Invigilator
        );
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&UserRole::Invigilator).unwrap();
        assert_eq!(json, "\"INVIGILATOR\"");
        let parsed: UserRole = serde_json::from_str("\"STUDENT\"").unwrap();
        assert_eq!(parsed, UserRole::Student);
    }
}
