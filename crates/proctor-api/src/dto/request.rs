//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use proctor_core::error::AppError;
use proctor_core::types::UserId;
use proctor_entity::alert::AlertSeverity;
use proctor_entity::user::UserRole;

/// Runs derive-based validation and folds every violation into one message.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{}: {}", field, detail)
            })
            .collect();
        fields.sort();
        AppError::validation(fields.join("; "))
    })
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email, unique.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub full_name: String,
    /// Plain-text password; checked against the password policy.
    pub password: String,
    /// Defaults to `STUDENT`.
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Student
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create exam session request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExamSessionRequest {
    /// Exam name.
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub exam_name: String,
    /// Student sitting the exam.
    pub student_id: UserId,
    /// Supervising invigilator.
    #[serde(default)]
    pub invigilator_id: Option<UserId>,
}

/// Raise alert request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertRequest {
    /// Severity.
    pub severity: AlertSeverity,
    /// Short event tag, e.g. `face_missing`.
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub event_type: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_entity::alert::model::MAX_EVENT_TYPE_LEN;

    #[test]
    fn test_register_defaults_to_student() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@example.com","full_name":"A","password":"x"}"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Student);
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            full_name: "A".into(),
            password: "x".into(),
            role: UserRole::Student,
        };
        let err = validate_body(&req).unwrap_err();
        assert!(err.message.contains("email"));
    }

    #[test]
    fn test_alert_event_type_length() {
        let mut req = CreateAlertRequest {
            severity: AlertSeverity::High,
            event_type: "face_missing".into(),
            description: String::new(),
        };
        assert!(validate_body(&req).is_ok());

        req.event_type = "x".repeat(MAX_EVENT_TYPE_LEN + 1);
        assert!(validate_body(&req).is_err());

        req.event_type.clear();
        assert!(validate_body(&req).is_err());
    }
}
