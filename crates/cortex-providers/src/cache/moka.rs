//! Moka in-memory cache provider
//!
//! Backs the LRU caches described for the completion pipeline's snippet
//! collectors: a bounded, concurrent, TTL-aware cache local to one process.

use async_trait::async_trait;
use cortex_domain::error::Result;
use cortex_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Moka-backed cache provider.
///
/// Capacity is entry count, not bytes — matching the `moka`, size-100
/// caches described for snippet/root-path collectors.
pub struct MokaCacheProvider {
    cache: Cache<String, String>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MokaCacheProvider {
    /// Create a cache with the given capacity (entry count) and default TTL.
    pub fn new(capacity: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(default_ttl)
            .build();

        Self {
            cache,
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        match self.cache.get(key).await {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        if config.ttl.is_some_and(|ttl| ttl != self.default_ttl) {
            tracing::debug!("per-entry TTL override ignored by moka cache policy");
        }
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.cache.run_pending_tasks().await;
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        })
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let provider = MokaCacheProvider::new(10, Duration::from_secs(60));
        provider
            .set_json("k", "v", CacheEntryConfig::default())
            .await
            .unwrap();
        assert_eq!(provider.get_json("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn missing_key_counts_as_miss() {
        let provider = MokaCacheProvider::new(10, Duration::from_secs(60));
        assert_eq!(provider.get_json("missing").await.unwrap(), None);
        let stats = provider.stats().await.unwrap();
        assert_eq!(stats.misses, 1);
    }
}
