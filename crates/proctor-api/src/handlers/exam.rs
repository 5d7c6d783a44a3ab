//! Exam session and alert handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use proctor_core::error::AppError;
use proctor_core::types::ExamSessionId;
use proctor_entity::alert::{Alert, CreateAlert};
use proctor_entity::exam_session::{CreateExamSession, ExamSession};
use proctor_entity::user::{User, UserRole};
use proctor_realtime::SessionGateway;
use proctor_realtime::hub::BroadcastReport;
use proctor_realtime::message::ServerEvent;

use crate::dto::request::{CreateAlertRequest, CreateExamSessionRequest, validate_body};
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_invigilator;
use crate::state::AppState;

/// POST {prefix}/exam/sessions
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateExamSessionRequest>,
) -> Result<(StatusCode, Json<ExamSession>), AppError> {
    require_invigilator(&auth)?;
    validate_body(&req)?;

    let session = state
        .exam_session_repo
        .create(&CreateExamSession {
            exam_name: req.exam_name,
            student_id: req.student_id,
            invigilator_id: req.invigilator_id,
        })
        .await?;

    info!(session_id = %session.id, created_by = %auth.id, "Exam session created");
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST {prefix}/exam/sessions/{id}/start
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<ExamSessionId>,
) -> Result<Json<ExamSession>, AppError> {
    require_invigilator(&auth)?;

    let session = state
        .exam_session_repo
        .start(session_id, state.clock.now())
        .await?
        .ok_or_else(|| AppError::not_found("Session not found"))?;

    info!(session_id = %session.id, started_by = %auth.id, "Exam session started");
    Ok(Json(session))
}

/// POST {prefix}/exam/sessions/{id}/alerts
///
/// Persists the alert and pushes an `alert_raised` event to everyone
/// connected to the session.
pub async fn create_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<ExamSessionId>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<Alert>), AppError> {
    validate_body(&req)?;

    let session = state
        .exam_session_repo
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found"))?;

    ensure_can_raise_alert(&auth, &session)?;

    let alert = state
        .alert_repo
        .create(&CreateAlert {
            exam_session_id: session.id,
            severity: req.severity,
            event_type: req.event_type,
            description: req.description,
        })
        .await?;

    let report = announce_alert(&state.gateway, &alert);

    info!(
        session_id = %session.id,
        alert_id = %alert.id,
        severity = %alert.severity,
        delivered = report.delivered,
        "Alert raised"
    );
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Students may only raise alerts on the session they are sitting.
pub(crate) fn ensure_can_raise_alert(user: &User, session: &ExamSession) -> Result<(), AppError> {
    if user.role == UserRole::Student && !session.is_student(user.id) {
        return Err(AppError::authorization("Not allowed"));
    }
    Ok(())
}

/// Pushes `alert_raised` for a persisted alert to its session's connections.
pub(crate) fn announce_alert(gateway: &SessionGateway, alert: &Alert) -> BroadcastReport {
    gateway.publish(
        alert.exam_session_id,
        &ServerEvent::AlertRaised {
            alert: alert.clone(),
        },
    )
}

/// GET {prefix}/exam/sessions/{id}/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<ExamSessionId>,
) -> Result<Json<Vec<Alert>>, AppError> {
    require_invigilator(&auth)?;

    if state.exam_session_repo.find_by_id(session_id).await?.is_none() {
        return Err(AppError::not_found("Session not found"));
    }

    let alerts = state.alert_repo.find_by_session(session_id).await?;
    Ok(Json(alerts))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use proctor_core::config::RealtimeConfig;
    use proctor_core::error::ErrorKind;
    use proctor_core::types::{AlertId, UserId};
    use proctor_entity::alert::AlertSeverity;
    use proctor_entity::exam_session::SessionStatus;
    use proctor_realtime::BroadcastHub;

    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: UserId::new(),
            email: "someone@example.com".to_string(),
            full_name: "Someone".to_string(),
            hashed_password: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    fn session_for(student: &User) -> ExamSession {
        ExamSession {
            id: ExamSessionId::new(),
            exam_name: "Algebra II".to_string(),
            status: SessionStatus::Active,
            student_id: student.id,
            invigilator_id: None,
            started_at: Some(Utc::now()),
            ended_at: None,
            created_at: Utc::now(),
        }
    }

    fn alert_on(session: &ExamSession) -> Alert {
        Alert {
            id: AlertId::new(),
            exam_session_id: session.id,
            severity: AlertSeverity::Critical,
            event_type: "tab_switch".to_string(),
            description: "Left the exam tab".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_student_may_raise_on_own_session() {
        let student = user(UserRole::Student);
        let session = session_for(&student);
        assert!(ensure_can_raise_alert(&student, &session).is_ok());
    }

    #[test]
    fn test_student_cannot_raise_on_another_session() {
        let owner = user(UserRole::Student);
        let intruder = user(UserRole::Student);
        let session = session_for(&owner);

        let err = ensure_can_raise_alert(&intruder, &session).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let response = axum::response::IntoResponse::into_response(err);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invigilator_may_raise_on_any_session() {
        let student = user(UserRole::Student);
        let invigilator = user(UserRole::Invigilator);
        let session = session_for(&student);
        assert!(ensure_can_raise_alert(&invigilator, &session).is_ok());
    }

    #[test]
    fn test_persisted_alert_reaches_only_its_session() {
        let gateway = SessionGateway::new(Arc::new(BroadcastHub::new()), RealtimeConfig::default());
        let student = user(UserRole::Student);
        let session = session_for(&student);
        let other = session_for(&user(UserRole::Student));

        let (_watcher, mut watcher_rx) = gateway.on_connect(session.id, "invigilator");
        let (_bystander, mut bystander_rx) = gateway.on_connect(other.id, "bystander");

        let alert = alert_on(&session);
        let report = announce_alert(&gateway, &alert);
        assert_eq!(report.delivered, 1);

        let frame = watcher_rx.try_recv().unwrap();
        let event: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(event["type"], "alert_raised");
        assert_eq!(event["alert"]["id"], alert.id.to_string());
        assert_eq!(event["alert"]["severity"], "CRITICAL");
        assert_eq!(event["alert"]["event_type"], "tab_switch");
        assert!(bystander_rx.try_recv().is_err());
    }
}
