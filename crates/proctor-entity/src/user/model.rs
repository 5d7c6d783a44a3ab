//! User entity model.

use chrono::{DateTime, Utc};
use proctor_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A registered participant: a student sitting exams or an invigilator
/// supervising them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Participant role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user supervises exams.
    pub fn is_invigilator(&self) -> bool {
        self.role.is_invigilator()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email, already normalized to lowercase.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Pre-hashed password.
    pub hashed_password: String,
    /// Assigned role.
    pub role: UserRole,
}
