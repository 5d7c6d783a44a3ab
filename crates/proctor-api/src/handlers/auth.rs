//! Auth handlers: register, login, refresh.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use proctor_auth::TokenPair;
use proctor_core::error::AppError;
use proctor_entity::user::CreateUser;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, validate_body};
use crate::dto::response::UserResponse;
use crate::state::AppState;

/// POST {prefix}/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    validate_body(&req)?;
    state
        .password_validator
        .validate(&req.password, &[req.email.as_str(), req.full_name.as_str()])?;

    if state.user_repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let hashed_password = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&CreateUser {
            email: req.email.trim().to_lowercase(),
            full_name: req.full_name,
            hashed_password,
            role: req.role,
        })
        .await?;

    info!(user_id = %user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST {prefix}/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    validate_body(&req)?;

    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::authentication("Incorrect email or password"))?;

    if !state
        .password_hasher
        .verify_password(&req.password, &user.hashed_password)?
    {
        return Err(AppError::authentication("Incorrect email or password"));
    }

    let pair = state.credentials.issue(&user.id.to_string()).await?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(pair))
}

/// POST {prefix}/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = state.credentials.refresh(&req.refresh_token).await?;
    Ok(Json(pair))
}
