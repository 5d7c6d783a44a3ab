//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `proctor_core::http` (orphan rule).

pub use proctor_core::http::{ApiErrorResponse, status_for};

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use proctor_core::error::{AppError, ErrorKind};

    #[test]
    fn test_credential_failures_are_unauthorized() {
        let resp = AppError::authentication("REVOKED_OR_EXPIRED").into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_outage_is_service_unavailable() {
        let resp = AppError::service_unavailable("STORE_UNAVAILABLE").into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Authorization).0, StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Conflict).0, StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Database).0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
