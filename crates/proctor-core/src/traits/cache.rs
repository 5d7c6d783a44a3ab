//! Cache provider trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for key-value backends (Redis or in-memory).
///
/// Values are plain strings. Every write carries a TTL, and an expired key
/// must be indistinguishable from an absent one. Errors are reported as
/// `ErrorKind::Cache` and callers must never treat a failed write as
/// successful.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Atomically read and remove a key (GETDEL).
    ///
    /// Of any number of concurrent callers for the same key, at most one
    /// observes `Some`.
    async fn take(&self, key: &str) -> AppResult<Option<String>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}
