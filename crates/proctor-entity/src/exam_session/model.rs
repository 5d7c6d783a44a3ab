//! Exam session entity model.

use chrono::{DateTime, Utc};
use proctor_core::types::{ExamSessionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SessionStatus;

/// One sitting of an exam by one student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamSession {
    /// Unique session identifier. Also the broadcast channel key.
    pub id: ExamSessionId,
    /// Exam title.
    pub exam_name: String,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// The student sitting the exam.
    pub student_id: UserId,
    /// The supervising invigilator, if assigned.
    pub invigilator_id: Option<UserId>,
    /// When the session was started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the session ended.
    pub ended_at: Option<DateTime<Utc>>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl ExamSession {
    /// Whether `user_id` is the student sitting this session.
    pub fn is_student(&self, user_id: UserId) -> bool {
        self.student_id == user_id
    }
}

/// Data required to schedule a new exam session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamSession {
    /// Exam title.
    pub exam_name: String,
    /// The student sitting the exam.
    pub student_id: UserId,
    /// Optional supervising invigilator.
    pub invigilator_id: Option<UserId>,
}
