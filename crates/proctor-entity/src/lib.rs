//! # proctor-entity
//!
//! Domain entity models for Proctor. Every struct in this crate
//! represents a database table row or the input needed to create one.
//! Database entities derive `sqlx::FromRow`; enums map to PostgreSQL
//! enum types via `sqlx::Type`.

pub mod alert;
pub mod exam_session;
pub mod user;
