//! # proctor-core
//!
//! Core crate for Proctor. Contains configuration schemas, the unified
//! error system, typed identifiers, and the traits that the cache and
//! auth crates implement or consume (`CacheProvider`, `Clock`).
//!
//! This crate has **no** internal dependencies on other Proctor crates.

pub mod config;
pub mod error;
pub mod http;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
