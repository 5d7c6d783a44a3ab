//! # proctor-database
//!
//! PostgreSQL connection management, embedded migrations, and repository
//! implementations for users, exam sessions, and alerts.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AlertRepository, ExamSessionRepository, UserRepository};
