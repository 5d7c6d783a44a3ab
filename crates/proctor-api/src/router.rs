//! Route definitions for the Proctor HTTP API.
//!
//! REST routes are mounted under the configured API prefix; health checks
//! and the exam WebSocket live at the root.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(exam_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let prefix = normalize_prefix(&state.config.server.api_prefix);

    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    router
        .merge(health_routes())
        .merge(ws_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Ensures a leading slash and no trailing slash; `/` becomes empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Register, login, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// Current user and user listing
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users", get(handlers::user::list_users))
}

/// Exam sessions and their alerts
fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/exam/sessions", post(handlers::exam::create_session))
        .route(
            "/exam/sessions/{id}/start",
            post(handlers::exam::start_session),
        )
        .route(
            "/exam/sessions/{id}/alerts",
            post(handlers::exam::create_alert).get(handlers::exam::list_alerts),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Per-exam-session WebSocket
fn ws_routes() -> Router<AppState> {
    Router::new().route("/ws/exam/{session_id}", get(handlers::ws::ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api/v1"), "/api/v1");
        assert_eq!(normalize_prefix("/api/v1/"), "/api/v1");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}
