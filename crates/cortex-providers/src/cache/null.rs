//! Null cache provider
//!
//! A cache provider that doesn't store anything. Used when the cache
//! section is disabled or in tests that don't care about caching behavior.

use async_trait::async_trait;
use cortex_domain::error::Result;
use cortex_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};

/// Accepts every write, never returns a hit.
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::default())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
