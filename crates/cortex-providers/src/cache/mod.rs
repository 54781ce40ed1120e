//! Cache Provider Implementations
//!
//! In-process LRU caches backing the completion pipeline's snippet
//! collectors.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`NullCacheProvider`] | No-op stub for testing |
//! | [`MokaCacheProvider`] | Bounded in-memory cache (default) |

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;

#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;

pub use cortex_domain::ports::providers::{CacheEntryConfig, CacheStats};
