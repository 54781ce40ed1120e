//! Chunk per-artifact index
//!
//! Extracts chunks via the configured [`Chunker`](crate::chunker::Chunker) and
//! stores them keyed by `(path, cache_key)`.

use super::{progress, ArtifactIndex, ProgressStream};
use crate::chunker::Chunker;
use crate::planner::{ReadFile, RefreshPlanner};
use cortex_domain::entities::{ArtifactId, IndexingStatus, PathAndCacheKey, ProgressUpdate, RefreshPlan, RefreshPlanKind, Tag};
use cortex_domain::repositories::ChunkRepository;
use std::sync::Arc;

pub struct ChunkIndex {
    chunks: Arc<dyn ChunkRepository>,
    chunker: Arc<dyn Chunker>,
    max_chunk_size: usize,
}

impl ChunkIndex {
    pub fn new(chunks: Arc<dyn ChunkRepository>, chunker: Arc<dyn Chunker>, max_chunk_size: usize) -> Self {
        Self { chunks, chunker, max_chunk_size }
    }
}

async fn compute_one(
    chunks: &Arc<dyn ChunkRepository>,
    chunker: &Arc<dyn Chunker>,
    max_chunk_size: usize,
    item: &PathAndCacheKey,
    read_file: &ReadFile,
) {
    let Ok(bytes) = read_file(&item.path).await else { return };
    let content = String::from_utf8_lossy(&bytes);
    let filepath = item.path.to_string_lossy().to_string();
    let extracted = chunker.chunk(&content, &filepath, &item.cache_key, max_chunk_size);
    let _ = chunks.put_chunks(&filepath, &item.cache_key, &extracted).await;
}

#[async_trait::async_trait]
impl ArtifactIndex for ChunkIndex {
    fn artifact_id(&self) -> ArtifactId {
        ArtifactId::Chunks
    }

    async fn update(self: Arc<Self>, tag: Tag, plan: RefreshPlan, planner: Arc<RefreshPlanner>, read_file: ReadFile) -> ProgressStream {
        let chunks = self.chunks.clone();
        let chunker = self.chunker.clone();
        let max_chunk_size = self.max_chunk_size;

        Box::pin(async_stream::stream! {
            let total = plan.mutation_count();
            let mut done = 0usize;

            for item in &plan.compute {
                compute_one(&chunks, &chunker, max_chunk_size, item, &read_file).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Compute).await;
                done += 1;
                yield progress(done, total, "chunking");
            }
            for item in &plan.add_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Add).await;
                done += 1;
                yield progress(done, total, "linking chunks");
            }
            for item in &plan.remove_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "unlinking chunks");
            }
            for item in &plan.del {
                let filepath = item.path.to_string_lossy().to_string();
                let _ = chunks.delete_chunks(&filepath, &item.cache_key).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "deleting chunks");
            }

            yield ProgressUpdate::new(1.0, "chunk index up to date", IndexingStatus::Done);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::SmartChunker;
    use cortex_providers::catalog::SqliteCatalog;
    use cortex_providers::chunk_store::InMemoryChunkRepository;
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

    #[tokio::test]
    async fn compute_item_is_chunked_and_stored() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        let index = Arc::new(ChunkIndex::new(chunk_repo.clone(), Arc::new(SmartChunker::new()), 200));

        let tag = Tag::new("/repo", "main", ArtifactId::Chunks);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { compute: vec![item.clone()], ..Default::default() };
        let files = HashMap::from([(PathBuf::from("/repo/a.rs"), b"fn main() {}".to_vec())]);

        let mut stream = index.update(tag, plan, planner, read_fn(files)).await;
        while stream.next().await.is_some() {}

        let stored = chunk_repo.get_chunks("/repo/a.rs", "abc").await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn del_item_removes_stored_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        chunk_repo
            .put_chunks(
                "/repo/a.rs",
                "abc",
                &[cortex_domain::entities::Chunk {
                    content: "fn main() {}".into(),
                    start_line: 0,
                    end_line: 0,
                    filepath: "/repo/a.rs".into(),
                    digest: "abc".into(),
                    index: 0,
                }],
            )
            .await
            .unwrap();
        let index = Arc::new(ChunkIndex::new(chunk_repo.clone(), Arc::new(SmartChunker::new()), 200));

        let tag = Tag::new("/repo", "main", ArtifactId::Chunks);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { del: vec![item], ..Default::default() };

        let mut stream = index.update(tag, plan, planner, read_fn(HashMap::new())).await;
        while stream.next().await.is_some() {}

        assert!(chunk_repo.get_chunks("/repo/a.rs", "abc").await.unwrap().is_empty());
    }
}
