//! Null vector store provider
//!
//! No-op implementation of [`VectorStoreProvider`]. Collections are tracked
//! by name only; no vectors are ever stored or returned.

use async_trait::async_trait;
use cortex_domain::error::{Error, Result};
use cortex_domain::ports::providers::VectorStoreProvider;
use cortex_domain::value_objects::{Embedding, SearchResult};
use dashmap::DashSet;
use std::collections::HashMap;
use std::sync::Arc;

/// Tracks collection names for existence checks; stores no vectors.
pub struct NullVectorStoreProvider {
    collections: Arc<DashSet<String>>,
}

impl NullVectorStoreProvider {
    /// Create a new null vector store provider.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashSet::new()),
        }
    }
}

impl Default for NullVectorStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStoreProvider for NullVectorStoreProvider {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        if !self.collections.insert(name.to_string()) {
            return Err(Error::vector_db(format!(
                "collection '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.remove(name);
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.contains(name))
    }

    async fn insert_vectors(
        &self,
        _collection: &str,
        vectors: &[Embedding],
        _metadata: Vec<HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<String>> {
        Ok(vec!["".to_string(); vectors.len()])
    }

    async fn search_similar(
        &self,
        _collection: &str,
        _query_vector: &[f32],
        _limit: usize,
        _filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }

    async fn delete_vectors(&self, _collection: &str, _ids: &[String]) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
