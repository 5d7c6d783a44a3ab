//! Alert entity model.

use chrono::{DateTime, Utc};
use proctor_core::types::{AlertId, ExamSessionId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::severity::AlertSeverity;

/// Maximum length of an alert's `event_type`, matching the column width.
pub const MAX_EVENT_TYPE_LEN: usize = 100;

/// A suspicious event recorded against an exam session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The session the alert belongs to.
    pub exam_session_id: ExamSessionId,
    /// Severity.
    pub severity: AlertSeverity,
    /// Short machine-readable event name (e.g. `"tab_switch"`).
    pub event_type: String,
    /// Free-form description.
    pub description: String,
    /// When the alert was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlert {
    /// Target session.
    pub exam_session_id: ExamSessionId,
    /// Severity.
    pub severity: AlertSeverity,
    /// Event name.
    pub event_type: String,
    /// Description.
    pub description: String,
}
