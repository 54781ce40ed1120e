//! Vector per-artifact index
//!
//! Embeds each compute item's chunks and upserts them into the configured
//! vector store, keyed by `(path, cache_key, chunk_index)`. Construction
//! returns `None` when no embedding provider is configured; the orchestrator
//! then omits this artifact from its list entirely.

use super::{progress, ArtifactIndex, ProgressStream};
use crate::chunker::Chunker;
use crate::planner::{ReadFile, RefreshPlanner};
use cortex_domain::entities::{ArtifactId, IndexingStatus, PathAndCacheKey, ProgressUpdate, RefreshPlan, RefreshPlanKind, Tag};
use cortex_domain::ports::providers::{EmbeddingProvider, VectorStoreProvider};
use cortex_domain::repositories::ChunkRepository;
use dashmap::DashMap;
use std::sync::Arc;

fn vector_key(path: &str, cache_key: &str) -> String {
    format!("{path}\u{0}{cache_key}")
}

pub struct VectorIndex {
    chunks: Arc<dyn ChunkRepository>,
    chunker: Arc<dyn Chunker>,
    embeddings: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    max_chunk_size: usize,
    vector_ids: DashMap<String, Vec<String>>,
}

impl VectorIndex {
    /// Build a vector index, or return `None` if `embeddings` is absent
    /// (no embedding model configured).
    pub fn new(
        chunks: Arc<dyn ChunkRepository>,
        chunker: Arc<dyn Chunker>,
        embeddings: Option<Arc<dyn EmbeddingProvider>>,
        vector_store: Arc<dyn VectorStoreProvider>,
        max_chunk_size: usize,
    ) -> Option<Self> {
        let embeddings = embeddings?;
        Some(Self {
            chunks,
            chunker,
            embeddings,
            vector_store,
            max_chunk_size,
            vector_ids: DashMap::new(),
        })
    }

    fn collection(tag: &Tag) -> String {
        format!("{}::{}", tag.directory, tag.branch)
    }

    async fn compute_one(&self, tag: &Tag, item: &PathAndCacheKey, read_file: &ReadFile) {
        let Ok(bytes) = read_file(&item.path).await else { return };
        let content = String::from_utf8_lossy(&bytes);
        let filepath = item.path.to_string_lossy().to_string();
        let extracted = self.chunker.chunk(&content, &filepath, &item.cache_key, self.max_chunk_size);
        let _ = self.chunks.put_chunks(&filepath, &item.cache_key, &extracted).await;

        if extracted.is_empty() {
            return;
        }
        let texts: Vec<String> = extracted.iter().map(|c| c.content.clone()).collect();
        let Ok(vectors) = self.embeddings.embed_batch(&texts).await else { return };

        let collection = Self::collection(tag);
        let _ = self.vector_store.create_collection(&collection, self.embeddings.dimensions()).await;
        let metadata = extracted
            .iter()
            .map(|c| {
                let mut m = std::collections::HashMap::new();
                m.insert("path".to_string(), serde_json::Value::String(filepath.clone()));
                m.insert("cache_key".to_string(), serde_json::Value::String(item.cache_key.clone()));
                m.insert("chunk_index".to_string(), serde_json::Value::from(c.index));
                m
            })
            .collect();
        if let Ok(ids) = self.vector_store.insert_vectors(&collection, &vectors, metadata).await {
            self.vector_ids.insert(vector_key(&filepath, &item.cache_key), ids);
        }
    }

    async fn delete_one(&self, tag: &Tag, item: &PathAndCacheKey) {
        let filepath = item.path.to_string_lossy().to_string();
        if let Some((_, ids)) = self.vector_ids.remove(&vector_key(&filepath, &item.cache_key)) {
            let _ = self.vector_store.delete_vectors(&Self::collection(tag), &ids).await;
        }
    }
}

#[async_trait::async_trait]
impl ArtifactIndex for VectorIndex {
    fn artifact_id(&self) -> ArtifactId {
        ArtifactId::Vector
    }

    async fn update(self: Arc<Self>, tag: Tag, plan: RefreshPlan, planner: Arc<RefreshPlanner>, read_file: ReadFile) -> ProgressStream {
        Box::pin(async_stream::stream! {
            let total = plan.mutation_count();
            let mut done = 0usize;

            for item in &plan.compute {
                self.compute_one(&tag, item, &read_file).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Compute).await;
                done += 1;
                yield progress(done, total, "embedding");
            }
            for item in &plan.add_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Add).await;
                done += 1;
                yield progress(done, total, "linking vectors");
            }
            for item in &plan.remove_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "unlinking vectors");
            }
            for item in &plan.del {
                self.delete_one(&tag, item).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "deleting vectors");
            }

            yield ProgressUpdate::new(1.0, "vector index up to date", IndexingStatus::Done);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::SmartChunker;
    use crate::planner::RefreshPlanner;
    use cortex_providers::catalog::SqliteCatalog;
    use cortex_providers::chunk_store::InMemoryChunkRepository;
    use cortex_providers::embedding::NullEmbeddingProvider;
    use cortex_providers::vector_store::InMemoryVectorStoreProvider;
    use futures::StreamExt;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    fn read_fn(files: HashMap<PathBuf, Vec<u8>>) -> ReadFile {
        let files = Arc::new(Mutex::new(files));
        Arc::new(move |path: &Path| {
            let files = files.clone();
            let path = path.to_path_buf();
            Box::pin(async move {
                files.lock().unwrap().get(&path).cloned().ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
                })
            })
        })
    }

    fn new_index(chunk_repo: Arc<InMemoryChunkRepository>) -> Arc<VectorIndex> {
        Arc::new(
            VectorIndex::new(
                chunk_repo,
                Arc::new(SmartChunker::new()),
                Some(Arc::new(NullEmbeddingProvider::new())),
                Arc::new(InMemoryVectorStoreProvider::new()),
                200,
            )
            .unwrap(),
        )
    }

    #[test]
    fn construction_requires_an_embedding_provider() {
        let chunks = Arc::new(InMemoryChunkRepository::new());
        let missing = VectorIndex::new(
            chunks,
            Arc::new(SmartChunker::new()),
            None,
            Arc::new(InMemoryVectorStoreProvider::new()),
            200,
        );
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn compute_item_embeds_and_inserts_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        let index = new_index(chunk_repo.clone());

        let tag = Tag::new("/repo", "main", ArtifactId::Vector);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { compute: vec![item.clone()], ..Default::default() };
        let files = HashMap::from([(PathBuf::from("/repo/a.rs"), b"fn main() {}".to_vec())]);

        let mut stream = index.clone().update(tag.clone(), plan, planner, read_fn(files)).await;
        while stream.next().await.is_some() {}

        assert_eq!(index.vector_ids.len(), 1);
        let stored = chunk_repo.get_chunks("/repo/a.rs", "abc").await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn del_item_removes_inserted_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        let index = new_index(chunk_repo.clone());

        let tag = Tag::new("/repo", "main", ArtifactId::Vector);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let compute_plan = RefreshPlan { compute: vec![item.clone()], ..Default::default() };
        let files = HashMap::from([(PathBuf::from("/repo/a.rs"), b"fn main() {}".to_vec())]);
        let mut stream = index.clone().update(tag.clone(), compute_plan, planner.clone(), read_fn(files)).await;
        while stream.next().await.is_some() {}
        assert_eq!(index.vector_ids.len(), 1);

        let del_plan = RefreshPlan { del: vec![item], ..Default::default() };
        let mut stream = index.clone().update(tag, del_plan, planner, read_fn(HashMap::new())).await;
        while stream.next().await.is_some() {}

        assert!(index.vector_ids.is_empty());
    }
}
