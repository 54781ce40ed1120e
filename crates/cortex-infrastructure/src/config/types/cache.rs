//! Cache configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// In-process LRU cache configuration (AST-rooted context, diff snippets, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held per cache
    pub capacity: u64,

    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LRU_CACHE_CAPACITY,
            ttl_secs: CACHE_DEFAULT_TTL_SECS,
        }
    }
}
