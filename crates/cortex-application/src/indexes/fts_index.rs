//! Full-text per-artifact index
//!
//! Tokenizes and scores the same chunks the chunk index extracts, through a
//! [`SearchRepository`] backend. `add_tag`/`remove_tag` are metadata-only:
//! the underlying keyword index is keyed by `(path, digest, chunk index)`,
//! not by tag, so content already indexed under one tag needs no re-indexing
//! for another.

use super::{progress, ArtifactIndex, ProgressStream};
use crate::chunker::Chunker;
use crate::planner::{ReadFile, RefreshPlanner};
use cortex_domain::entities::{ArtifactId, IndexingStatus, PathAndCacheKey, ProgressUpdate, RefreshPlan, RefreshPlanKind, Tag};
use cortex_domain::repositories::SearchRepository;
use std::sync::Arc;

pub struct FtsIndex {
    search: Arc<dyn SearchRepository>,
    chunker: Arc<dyn Chunker>,
    max_chunk_size: usize,
}

impl FtsIndex {
    pub fn new(search: Arc<dyn SearchRepository>, chunker: Arc<dyn Chunker>, max_chunk_size: usize) -> Self {
        Self { search, chunker, max_chunk_size }
    }

    fn collection(tag: &Tag) -> String {
        format!("{}::{}", tag.directory, tag.branch)
    }
}

async fn compute_one(
    search: &Arc<dyn SearchRepository>,
    chunker: &Arc<dyn Chunker>,
    max_chunk_size: usize,
    item: &PathAndCacheKey,
    read_file: &ReadFile,
) {
    let Ok(bytes) = read_file(&item.path).await else { return };
    let content = String::from_utf8_lossy(&bytes);
    let filepath = item.path.to_string_lossy().to_string();
    let extracted = chunker.chunk(&content, &filepath, &item.cache_key, max_chunk_size);
    if extracted.is_empty() {
        return;
    }
    let _ = search.index_for_hybrid_search(&extracted).await;
}

#[async_trait::async_trait]
impl ArtifactIndex for FtsIndex {
    fn artifact_id(&self) -> ArtifactId {
        ArtifactId::Fts
    }

    async fn update(self: Arc<Self>, tag: Tag, plan: RefreshPlan, planner: Arc<RefreshPlanner>, read_file: ReadFile) -> ProgressStream {
        let search = self.search.clone();
        let chunker = self.chunker.clone();
        let max_chunk_size = self.max_chunk_size;

        Box::pin(async_stream::stream! {
            let total = plan.mutation_count();
            let mut done = 0usize;

            for item in &plan.compute {
                compute_one(&search, &chunker, max_chunk_size, item, &read_file).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Compute).await;
                done += 1;
                yield progress(done, total, "indexing text");
            }
            for item in &plan.add_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Add).await;
                done += 1;
                yield progress(done, total, "linking text index");
            }
            for item in &plan.remove_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "unlinking text index");
            }
            for item in &plan.del {
                let filepath = item.path.to_string_lossy().to_string();
                let _ = search.clear_index(&filepath).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "deleting from text index");
            }

            let _ = Self::collection(&tag);
            yield ProgressUpdate::new(1.0, "text index up to date", IndexingStatus::Done);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::SmartChunker;
    use cortex_providers::catalog::SqliteCatalog;
    use cortex_providers::search::Bm25SearchRepository;
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
    async fn compute_item_is_searchable_afterward() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let search: Arc<dyn SearchRepository> = Arc::new(Bm25SearchRepository::new(None));
        let index = Arc::new(FtsIndex::new(search.clone(), Arc::new(SmartChunker::new()), 200));

        let tag = Tag::new("/repo", "main", ArtifactId::Fts);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { compute: vec![item], ..Default::default() };
        let files = HashMap::from([(PathBuf::from("/repo/a.rs"), b"fn authenticate_user() {}".to_vec())]);

        let mut stream = index.update(tag, plan, planner, read_fn(files)).await;
        while stream.next().await.is_some() {}

        let results = search.hybrid_search("", "authenticate", &[], 10).await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
