//! # proctor-api
//!
//! HTTP API layer for Proctor built on Axum.
//!
//! Provides the credential and exam endpoints, the per-session WebSocket
//! upgrade, middleware (logging, CORS), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
