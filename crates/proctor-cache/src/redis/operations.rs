//! Redis cache provider implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;

use proctor_core::error::{AppError, ErrorKind};
use proctor_core::result::AppResult;
use proctor_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
///
/// Every command is bounded by the client's response timeout; a timeout is
/// reported as a cache error, never as an absent key.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = redis::RedisResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.client.response_timeout(), fut).await {
            Ok(result) => result.map_err(Self::map_err),
            Err(_) => {
                warn!(op, "Redis command timed out");
                Err(AppError::cache(format!("Redis {op} timed out")))
            }
        }
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("GET", async move { conn.get(&full_key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let seconds = ttl.as_secs().max(1);
        self.bounded("SETEX", async move {
            conn.set_ex::<_, _, ()>(&full_key, value, seconds).await
        })
        .await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let removed: i64 = self
            .bounded("DEL", async move { conn.del(&full_key).await })
            .await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("EXISTS", async move { conn.exists(&full_key).await })
            .await
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("GETDEL", async move {
            redis::cmd("GETDEL")
                .arg(&full_key)
                .query_async::<Option<String>>(&mut conn)
                .await
        })
        .await
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = self
            .bounded("PING", async move {
                redis::cmd("PING").query_async(&mut conn).await
            })
            .await?;
        Ok(pong == "PONG")
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
