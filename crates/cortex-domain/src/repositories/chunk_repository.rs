//! Chunk Repository Interface
//!
//! Persistence for the chunk per-artifact index: the chunks produced by the
//! chunker for each indexed file version.

use crate::entities::Chunk;
use crate::error::Result;
use async_trait::async_trait;

/// Repository: Chunk Index Persistence
///
/// Stores and retrieves the chunks extracted for a given `(path, cache_key)`
/// file version. Chunks are owned by their owning per-artifact index and
/// outlive any single tag as long as at least one tag references them via
/// the global cache.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Store the chunks extracted for one file version, replacing any chunks
    /// previously stored for the same `(path, cache_key)`.
    async fn put_chunks(&self, path: &str, cache_key: &str, chunks: &[Chunk]) -> Result<()>;

    /// Retrieve the chunks stored for a file version, if any.
    async fn get_chunks(&self, path: &str, cache_key: &str) -> Result<Vec<Chunk>>;

    /// Remove the chunks stored for a file version.
    async fn delete_chunks(&self, path: &str, cache_key: &str) -> Result<()>;

    /// Repository statistics, primarily for diagnostics.
    async fn stats(&self) -> Result<RepositoryStats>;
}

/// Value Object: Chunk Repository Statistics
#[derive(Debug, Clone, Default)]
pub struct RepositoryStats {
    /// Number of distinct file versions with stored chunks
    pub indexed_versions: u64,
    /// Total number of chunks stored across all versions
    pub total_chunks: u64,
}
