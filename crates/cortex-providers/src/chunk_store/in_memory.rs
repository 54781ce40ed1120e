//! In-memory chunk repository
//!
//! Chunks live in a concurrent hash map and are lost on restart — matching
//! the in-memory vector store's scope for development and tests.

use async_trait::async_trait;
use cortex_domain::entities::Chunk;
use cortex_domain::error::Result;
use cortex_domain::repositories::{ChunkRepository, RepositoryStats};
use dashmap::DashMap;

fn key(path: &str, cache_key: &str) -> String {
    format!("{path}\u{0}{cache_key}")
}

/// Stores chunks in memory using a concurrent hash map keyed by `(path, cache_key)`.
#[derive(Default)]
pub struct InMemoryChunkRepository {
    chunks: DashMap<String, Vec<Chunk>>,
}

impl InMemoryChunkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate every stored chunk across all file versions — used by the
    /// full-text index, which has no narrower access pattern than "all
    /// chunks currently on disk".
    pub fn all_chunks(&self) -> Vec<Chunk> {
        self.chunks.iter().flat_map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl ChunkRepository for InMemoryChunkRepository {
    async fn put_chunks(&self, path: &str, cache_key: &str, chunks: &[Chunk]) -> Result<()> {
        self.chunks.insert(key(path, cache_key), chunks.to_vec());
        Ok(())
    }

    async fn get_chunks(&self, path: &str, cache_key: &str) -> Result<Vec<Chunk>> {
        Ok(self.chunks.get(&key(path, cache_key)).map(|v| v.clone()).unwrap_or_default())
    }

    async fn delete_chunks(&self, path: &str, cache_key: &str) -> Result<()> {
        self.chunks.remove(&key(path, cache_key));
        Ok(())
    }

    async fn stats(&self) -> Result<RepositoryStats> {
        let indexed_versions = self.chunks.len() as u64;
        let total_chunks = self.chunks.iter().map(|entry| entry.value().len() as u64).sum();
        Ok(RepositoryStats { indexed_versions, total_chunks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            start_line: 0,
            end_line: 0,
            filepath: "a.rs".to_string(),
            digest: "abc".to_string(),
            index: 0,
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let repo = InMemoryChunkRepository::new();
        repo.put_chunks("a.rs", "abc", &[chunk("fn a() {}")]).await.unwrap();
        let chunks = repo.get_chunks("a.rs", "abc").await.unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_version() {
        let repo = InMemoryChunkRepository::new();
        repo.put_chunks("a.rs", "abc", &[chunk("fn a() {}")]).await.unwrap();
        repo.delete_chunks("a.rs", "abc").await.unwrap();
        assert!(repo.get_chunks("a.rs", "abc").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_count_versions_and_chunks() {
        let repo = InMemoryChunkRepository::new();
        repo.put_chunks("a.rs", "abc", &[chunk("fn a() {}"), chunk("fn b() {}")]).await.unwrap();
        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.indexed_versions, 1);
        assert_eq!(stats.total_chunks, 2);
    }
}
