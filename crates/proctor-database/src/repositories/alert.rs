//! Alert repository implementation.

use sqlx::PgPool;

use proctor_core::error::{AppError, ErrorKind};
use proctor_core::result::AppResult;
use proctor_core::types::ExamSessionId;
use proctor_entity::alert::{Alert, CreateAlert};

/// Repository for proctoring alerts.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Create a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an alert.
    pub async fn create(&self, data: &CreateAlert) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            "INSERT INTO alerts (exam_session_id, severity, event_type, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.exam_session_id)
        .bind(data.severity)
        .bind(&data.event_type)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create alert", e))
    }

    /// List the alerts of a session, newest first.
    pub async fn find_by_session(&self, session_id: ExamSessionId) -> AppResult<Vec<Alert>> {
        sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts WHERE exam_session_id = $1 ORDER BY created_at DESC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list alerts", e))
    }
}
