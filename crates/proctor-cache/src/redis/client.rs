//! Redis connection management.

use std::time::Duration;

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use proctor_core::config::cache::RedisCacheConfig;
use proctor_core::error::{AppError, ErrorKind};
use proctor_core::result::AppResult;

/// Redis client wrapper with connection management.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis connection manager (multiplexed, reconnecting).
    conn: ConnectionManager,
    /// Key prefix for all keys.
    key_prefix: String,
    /// Upper bound on a single command round trip.
    response_timeout: Duration,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("key_prefix", &self.key_prefix)
            .field("response_timeout", &self.response_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Create a new Redis client from configuration.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(url = %mask_redis_url(&config.url), "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!("Connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
            response_timeout: Duration::from_millis(config.response_timeout_ms),
        })
    }

    /// Get a cloned handle to the connection manager.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Build a full key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    /// Per-command timeout.
    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }
}

/// Mask password in Redis URL for safe logging.
pub fn mask_redis_url(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    if let Some(at_pos) = url[scheme_end..].find('@').map(|p| p + scheme_end) {
        let credentials = &url[scheme_end..at_pos];
        return match credentials.find(':') {
            Some(colon) => format!(
                "{}{}:****@{}",
                &url[..scheme_end],
                &credentials[..colon],
                &url[at_pos + 1..]
            ),
            None => format!("{}****@{}", &url[..scheme_end], &url[at_pos + 1..]),
        };
    }
    url.to_string()
}
