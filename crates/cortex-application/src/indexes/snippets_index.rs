//! Snippets per-artifact index
//!
//! Extracts lightweight symbol snippets (top-level signatures, bodies
//! collapsed to a placeholder) by running the same AST-aware chunker used
//! for the chunk index at a much smaller token budget, so only signatures
//! survive rather than full bodies. Storage and lifecycle otherwise mirror
//! [`super::ChunkIndex`].

use super::{progress, ArtifactIndex, ProgressStream};
use crate::chunker::Chunker;
use crate::planner::{ReadFile, RefreshPlanner};
use cortex_domain::entities::{ArtifactId, IndexingStatus, PathAndCacheKey, ProgressUpdate, RefreshPlan, RefreshPlanKind, Tag};
use cortex_domain::repositories::ChunkRepository;
use std::sync::Arc;

/// Token budget for a snippet: large enough to hold a signature line and a
/// doc-comment header, small enough that collapsed function bodies never fit
/// and fall back to a placeholder.
const SNIPPET_TOKEN_BUDGET: usize = 48;

pub struct SnippetsIndex {
    snippets: Arc<dyn ChunkRepository>,
    chunker: Arc<dyn Chunker>,
}

impl SnippetsIndex {
    pub fn new(snippets: Arc<dyn ChunkRepository>, chunker: Arc<dyn Chunker>) -> Self {
        Self { snippets, chunker }
    }
}

async fn compute_one(snippets: &Arc<dyn ChunkRepository>, chunker: &Arc<dyn Chunker>, item: &PathAndCacheKey, read_file: &ReadFile) {
    let Ok(bytes) = read_file(&item.path).await else { return };
    let content = String::from_utf8_lossy(&bytes);
    let filepath = item.path.to_string_lossy().to_string();
    let extracted = chunker.chunk(&content, &filepath, &item.cache_key, SNIPPET_TOKEN_BUDGET);
    let _ = snippets.put_chunks(&filepath, &item.cache_key, &extracted).await;
}

#[async_trait::async_trait]
impl ArtifactIndex for SnippetsIndex {
    fn artifact_id(&self) -> ArtifactId {
        ArtifactId::Snippets
    }

    async fn update(self: Arc<Self>, tag: Tag, plan: RefreshPlan, planner: Arc<RefreshPlanner>, read_file: ReadFile) -> ProgressStream {
        let snippets = self.snippets.clone();
        let chunker = self.chunker.clone();

        Box::pin(async_stream::stream! {
            let total = plan.mutation_count();
            let mut done = 0usize;

            for item in &plan.compute {
                compute_one(&snippets, &chunker, item, &read_file).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Compute).await;
                done += 1;
                yield progress(done, total, "extracting snippets");
            }
            for item in &plan.add_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Add).await;
                done += 1;
                yield progress(done, total, "linking snippets");
            }
            for item in &plan.remove_tag {
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "unlinking snippets");
            }
            for item in &plan.del {
                let filepath = item.path.to_string_lossy().to_string();
                let _ = snippets.delete_chunks(&filepath, &item.cache_key).await;
                let _ = planner.complete(&tag, std::slice::from_ref(item), RefreshPlanKind::Remove).await;
                done += 1;
                yield progress(done, total, "deleting snippets");
            }

            yield ProgressUpdate::new(1.0, "snippets index up to date", IndexingStatus::Done);
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
    async fn compute_item_yields_signature_only_snippet() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let snippet_repo = Arc::new(InMemoryChunkRepository::new());
        let index = Arc::new(SnippetsIndex::new(snippet_repo.clone(), Arc::new(SmartChunker::new())));

        let tag = Tag::new("/repo", "main", ArtifactId::Snippets);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { compute: vec![item], ..Default::default() };
        let source = "fn long_function() {\n    let mut total = 0;\n    for i in 0..1000 {\n        total += i;\n    }\n    println!(\"{total}\");\n}\n";
        let files = HashMap::from([(PathBuf::from("/repo/a.rs"), source.as_bytes().to_vec())]);

        let mut stream = index.update(tag, plan, planner, read_fn(files)).await;
        while stream.next().await.is_some() {}

        let stored = snippet_repo.get_chunks("/repo/a.rs", "abc").await.unwrap();
        assert!(!stored.is_empty());
        assert!(stored.iter().all(|c| c.content.len() < source.len()));
    }

    #[tokio::test]
    async fn del_item_removes_stored_snippets() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let snippet_repo = Arc::new(InMemoryChunkRepository::new());
        snippet_repo
            .put_chunks(
                "/repo/a.rs",
                "abc",
                &[cortex_domain::entities::Chunk {
                    content: "fn f() { ... }".into(),
                    start_line: 0,
                    end_line: 0,
                    filepath: "/repo/a.rs".into(),
                    digest: "abc".into(),
                    index: 0,
                }],
            )
            .await
            .unwrap();
        let index = Arc::new(SnippetsIndex::new(snippet_repo.clone(), Arc::new(SmartChunker::new())));

        let tag = Tag::new("/repo", "main", ArtifactId::Snippets);
        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        let plan = RefreshPlan { del: vec![item], ..Default::default() };

        let mut stream = index.update(tag, plan, planner, read_fn(HashMap::new())).await;
        while stream.next().await.is_some() {}

        assert!(snippet_repo.get_chunks("/repo/a.rs", "abc").await.unwrap().is_empty());
    }
}
