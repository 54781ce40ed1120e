//! Vector Store Provider Port
//!
//! Contract for persisting and retrieving semantic embeddings, backing the
//! vector per-artifact index. Implementations range from an in-process
//! HashMap to an on-disk sharded store.

use crate::error::Result;
use crate::value_objects::{Embedding, SearchResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// Enterprise Vector Storage Interface
///
/// Defines the business contract for vector storage systems that persist and
/// retrieve semantic embeddings. This abstraction supports multiple storage
/// backends, from in-memory development stores to on-disk sharded ones.
///
/// # Example
///
/// ```ignore
/// use cortex_domain::ports::providers::VectorStoreProvider;
///
/// provider.create_collection("rust_code", 1536).await?;
/// let ids = provider.insert_vectors("rust_code", &embeddings, metadata).await?;
/// let results = provider.search_similar("rust_code", &query_vec, 10, None).await?;
/// ```
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Create a new vector collection with specified dimensions.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete an existing vector collection.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Check if a collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Insert vectors into a collection with associated metadata, returning
    /// the ids assigned to each inserted vector.
    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<String>>;

    /// Search for vectors similar to a query vector, ranked by similarity.
    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>>;

    /// Delete vectors by their ids.
    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()>;

    /// Identifier for logging and config validation (e.g. "memory", "filesystem").
    fn provider_name(&self) -> &str;

    /// Default health check: collection_exists on a sentinel name must not error.
    async fn health_check(&self) -> Result<()> {
        self.collection_exists("__health_check__").await?;
        Ok(())
    }
}
