//! `AuthUser` extractor: pulls the access token from the Authorization
//! header, validates it, and loads the user it names.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use proctor_core::error::AppError;
use proctor_core::types::UserId;
use proctor_entity::user::User;

use crate::state::AppState;

/// The authenticated caller, available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Returns the inner user.
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extracts the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = bearer_token(auth_header)
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.credentials.authenticate_access(token)?;

        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AppError::authentication("Could not validate credentials"))?;

        let user = state
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        Ok(AuthUser(user))
    }
}
