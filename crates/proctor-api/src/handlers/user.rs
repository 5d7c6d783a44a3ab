//! User handlers.

use axum::Json;
use axum::extract::State;

use proctor_core::error::AppError;

use crate::dto::response::UserResponse;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_invigilator;
use crate::state::AppState;

/// GET {prefix}/users/me
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(auth.0))
}

/// GET {prefix}/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    require_invigilator(&auth)?;
    let users = state.user_repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
