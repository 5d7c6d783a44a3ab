//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use proctor_core::types::UserId;
use proctor_entity::user::{User, UserRole};
use proctor_realtime::MetricsSnapshot;

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role.
    pub role: UserRole,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness response with dependency checks and hub counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// `"connected"` or `"unavailable"`.
    pub database: String,
    /// `"connected"` or `"unavailable"`.
    pub cache: String,
    /// Cache backend name.
    pub cache_provider: String,
    /// Exam sessions with at least one live connection.
    pub active_sessions: usize,
    /// Live WebSocket connections.
    pub ws_connections: usize,
    /// Hub counters.
    pub hub: MetricsSnapshot,
}
