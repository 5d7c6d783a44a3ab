//! # proctor-cache
//!
//! Key-value providers for Proctor. The refresh-token ledger is the only
//! consumer, so the surface is small: get, set-with-TTL, delete, and an
//! atomic take. Two backends are available:
//!
//! - **memory**: In-process store using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
