//! In-memory vector store provider
//!
//! Backs the `VectorStoreProviderKind::Memory` configuration: vectors and
//! metadata live in concurrent hash maps and are lost on restart. This is
//! the default for development and for tests that don't need persistence.

use crate::utils::JsonExt;
use async_trait::async_trait;
use cortex_domain::entities::Language;
use cortex_domain::error::{Error, Result};
use cortex_domain::ports::providers::VectorStoreProvider;
use cortex_domain::value_objects::{Embedding, SearchResult};
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

type CollectionEntry = (Embedding, HashMap<String, Value>);

/// Stores vectors and metadata in memory using concurrent hash maps.
pub struct InMemoryVectorStoreProvider {
    collections: Arc<DashMap<String, Vec<CollectionEntry>>>,
}

impl InMemoryVectorStoreProvider {
    /// Create a new in-memory vector store provider.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryVectorStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStoreProvider {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        if self.collections.contains_key(name) {
            return Err(Error::vector_db(format!(
                "collection '{}' already exists",
                name
            )));
        }
        self.collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.remove(name);
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.contains_key(name))
    }

    async fn insert_vectors(
        &self,
        collection: &str,
        vectors: &[Embedding],
        metadata: Vec<HashMap<String, Value>>,
    ) -> Result<Vec<String>> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::vector_db(format!("collection '{}' not found", collection)))?;

        let mut ids = Vec::with_capacity(vectors.len());
        for (vector, mut meta) in vectors.iter().zip(metadata) {
            let id = format!("{}_{}", collection, coll.len());
            meta.insert("generated_id".to_string(), serde_json::json!(&id));
            coll.push((vector.clone(), meta));
            ids.push(id);
        }

        Ok(ids)
    }

    async fn search_similar(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        _filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let coll = match self.collections.get(collection) {
            Some(coll) => coll,
            None => return Ok(Vec::new()),
        };

        let query_norm = compute_norm(query_vector);
        let mut heap: BinaryHeap<ScoredItem> = BinaryHeap::with_capacity(limit + 1);

        for (i, (embedding, _metadata)) in coll.iter().enumerate() {
            let similarity =
                cosine_similarity_with_norm(query_vector, &embedding.vector, query_norm);

            if heap.len() < limit {
                heap.push(ScoredItem {
                    score: similarity,
                    index: i,
                });
            } else if let Some(min) = heap.peek() {
                if similarity > min.score {
                    heap.pop();
                    heap.push(ScoredItem {
                        score: similarity,
                        index: i,
                    });
                }
            }
        }

        let mut items: Vec<_> = heap.into_iter().collect();
        items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let search_results = items
            .into_iter()
            .map(|item| {
                let (_embedding, metadata) = &coll[item.index];
                metadata_to_search_result(metadata, item.score as f64)
            })
            .collect();

        Ok(search_results)
    }

    async fn delete_vectors(&self, collection: &str, ids: &[String]) -> Result<()> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::vector_db(format!("collection '{}' not found", collection)))?;

        coll.retain(|(_embedding, metadata)| {
            let generated_id = metadata.str_or("generated_id", "");
            !ids.contains(&generated_id.to_string())
        });
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Min-heap item for top-k selection: `O(n log k)` instead of `O(n log n)`.
#[derive(PartialEq)]
struct ScoredItem {
    score: f32,
    index: usize,
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn metadata_to_search_result(metadata: &HashMap<String, Value>, score: f64) -> SearchResult {
    let id = metadata.string_or("generated_id", "");
    let start_line = metadata.opt_u64("start_line").unwrap_or(0) as u32;
    let file_path = metadata.string_or("file_path", "");
    let language = file_path
        .rsplit('.')
        .next()
        .map(Language::from_extension)
        .unwrap_or(Language::PlainText);

    SearchResult {
        id,
        file_path,
        start_line,
        content: metadata.string_or("content", ""),
        score,
        language,
    }
}

/// Cosine similarity with a precomputed query norm, normalized to `[0, 1]`.
fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b) + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_search_returns_nearest() {
        let store = InMemoryVectorStoreProvider::new();
        store.create_collection("code", 3).await.unwrap();

        let embeddings = vec![
            Embedding { vector: vec![1.0, 0.0, 0.0], model: "t".into(), dimensions: 3 },
            Embedding { vector: vec![0.0, 1.0, 0.0], model: "t".into(), dimensions: 3 },
        ];
        let metadata = vec![
            HashMap::from([("file_path".to_string(), serde_json::json!("a.rs"))]),
            HashMap::from([("file_path".to_string(), serde_json::json!("b.rs"))]),
        ];
        store.insert_vectors("code", &embeddings, metadata).await.unwrap();

        let results = store
            .search_similar("code", &[1.0, 0.0, 0.0], 1, None)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "a.rs");
    }

    #[tokio::test]
    async fn search_on_missing_collection_returns_empty() {
        let store = InMemoryVectorStoreProvider::new();
        let results = store.search_similar("missing", &[1.0], 5, None).await.unwrap();
        assert!(results.is_empty());
    }
}
