//! Exam session lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an exam session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    /// Created but not started.
    #[default]
    Scheduled,
    /// In progress.
    Active,
    /// Finished.
    Completed,
}

impl SessionStatus {
    /// Return the status as its wire/database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
