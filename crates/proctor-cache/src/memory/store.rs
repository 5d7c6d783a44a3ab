//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use proctor_core::config::cache::MemoryCacheConfig;
use proctor_core::result::AppResult;
use proctor_core::traits::cache::CacheProvider;

/// A stored value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct CachedValue {
    value: String,
    ttl: Duration,
}

/// Expires each entry after its own TTL; overwrites restart the clock.
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Suitable for a single node and for tests. Entries vanish on restart.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, CachedValue>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(
                key.to_string(),
                CachedValue {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.remove(key).await.map(|entry| entry.value))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
