//! Exam session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use proctor_core::error::{AppError, ErrorKind};
use proctor_core::result::AppResult;
use proctor_core::types::ExamSessionId;
use proctor_entity::exam_session::{CreateExamSession, ExamSession, SessionStatus};

/// Repository for exam session scheduling and lifecycle.
#[derive(Debug, Clone)]
pub struct ExamSessionRepository {
    pool: PgPool,
}

impl ExamSessionRepository {
    /// Create a new exam session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by primary key.
    pub async fn find_by_id(&self, id: ExamSessionId) -> AppResult<Option<ExamSession>> {
        sqlx::query_as::<_, ExamSession>("SELECT * FROM exam_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find exam session", e)
            })
    }

    /// Schedule a new session.
    pub async fn create(&self, data: &CreateExamSession) -> AppResult<ExamSession> {
        sqlx::query_as::<_, ExamSession>(
            "INSERT INTO exam_sessions (exam_name, status, student_id, invigilator_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.exam_name)
        .bind(SessionStatus::Scheduled)
        .bind(data.student_id)
        .bind(data.invigilator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced student or invigilator does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create exam session", e),
        })
    }

    /// Mark a session active. Returns `None` if the session does not exist.
    pub async fn start(
        &self,
        id: ExamSessionId,
        started_at: DateTime<Utc>,
    ) -> AppResult<Option<ExamSession>> {
        sqlx::query_as::<_, ExamSession>(
            "UPDATE exam_sessions SET status = $2, started_at = $3 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(SessionStatus::Active)
        .bind(started_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to start exam session", e))
    }
}
