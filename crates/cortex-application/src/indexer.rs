//! Indexer orchestrator
//!
//! Walks configured directories, plans a refresh per per-artifact index via
//! [`RefreshPlanner`], and drives each index's [`ArtifactIndex::update`],
//! forwarding a single proportional progress stream to the caller.

use crate::indexes::{ArtifactIndex, ProgressStream};
use crate::planner::{ReadFile, RefreshPlanner};
use cortex_domain::entities::{FileStat, FileStats, IndexingStatus, ProgressUpdate, Tag};
use cortex_domain::error::Error;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Batch size default mirroring `DEFAULT_FILES_PER_BATCH` in the
/// infrastructure layer's config defaults; duplicated here rather than
/// imported because `cortex-infrastructure` depends on this crate, not the
/// other way around.
pub const DEFAULT_FILES_PER_BATCH: usize = 500;

/// How often `refresh_dirs` re-checks a pause flag while paused.
pub const PAUSE_POLL_INTERVAL_MS: u64 = 100;

/// Shared flag a caller flips to pause an in-flight `refresh_dirs` call
/// between batches without cancelling it outright.
pub type PauseFlag = Arc<AtomicBool>;

/// Stats a single filesystem entry, injected so directory walking stays
/// testable without touching the real filesystem.
pub type StatFile = Arc<dyn Fn(&Path) -> std::io::Result<FileStat> + Send + Sync>;

/// True when `err` matches the fixed pattern set of catalog/vector-store
/// corruption signatures that warrant a full reindex from scratch.
pub fn should_clear_indexes(err: &Error) -> bool {
    let message = err.to_string().to_lowercase();
    matches!(err, Error::Database { .. } | Error::VectorDb { .. })
        && (message.contains("corrupt") || message.contains("malformed") || message.contains("disk image"))
}

fn walk_files(dir: &Path, stat_file: &StatFile) -> FileStats {
    let mut stats = FileStats::new();
    for entry in ignore::WalkBuilder::new(dir).hidden(false).build().flatten() {
        if entry.file_type().is_some_and(|t| t.is_file()) {
            if let Ok(stat) = stat_file(entry.path()) {
                stats.insert(entry.path().to_path_buf(), stat);
            }
        }
    }
    stats
}

/// Coordinates the refresh planner and per-artifact indexes across a set of
/// workspace directories.
pub struct IndexerOrchestrator {
    planner: Arc<RefreshPlanner>,
    indexes: Vec<Arc<dyn ArtifactIndex>>,
    files_per_batch: usize,
}

impl IndexerOrchestrator {
    pub fn new(planner: Arc<RefreshPlanner>, indexes: Vec<Arc<dyn ArtifactIndex>>, files_per_batch: usize) -> Self {
        Self { planner, indexes, files_per_batch }
    }

    /// Walk `dirs` under `branch`, refreshing every configured artifact.
    /// Emits `loading` while walking, `indexing` proportional to position
    /// across every (directory, artifact, batch) triple, `paused` while
    /// `pause` is set, `cancelled` if `cancel` fires, and `failed` if any
    /// artifact update errors.
    #[allow(clippy::too_many_arguments)]
    pub fn refresh_dirs(
        self: Arc<Self>,
        dirs: Vec<PathBuf>,
        branch: String,
        cancel: CancellationToken,
        pause: PauseFlag,
        stat_file: StatFile,
        read_file: ReadFile,
    ) -> ProgressStream {
        Box::pin(async_stream::stream! {
            yield ProgressUpdate::new(0.0, "scanning workspace", IndexingStatus::Loading);

            let total_steps = dirs.len() * self.indexes.len();
            let mut step = 0usize;

            'dirs: for dir in &dirs {
                if cancel.is_cancelled() {
                    yield ProgressUpdate::cancelled();
                    return;
                }
                let directory = dir.to_string_lossy().to_string();
                let file_stats = walk_files(dir, &stat_file);

                for index in &self.indexes {
                    while pause.load(Ordering::SeqCst) {
                        let fraction = if total_steps == 0 { 0.0 } else { step as f32 / total_steps as f32 };
                        yield ProgressUpdate::paused(fraction);
                        tokio::time::sleep(Duration::from_millis(PAUSE_POLL_INTERVAL_MS)).await;
                        if cancel.is_cancelled() {
                            yield ProgressUpdate::cancelled();
                            return;
                        }
                    }
                    if cancel.is_cancelled() {
                        yield ProgressUpdate::cancelled();
                        return;
                    }

                    let tag = Tag::new(directory.clone(), branch.clone(), index.artifact_id());
                    let plan = match self.planner.plan(&tag, &file_stats, read_file.clone()).await {
                        Ok(plan) => plan,
                        Err(err) => {
                            yield failed(&err);
                            continue 'dirs;
                        }
                    };

                    for batch in plan.batches(self.files_per_batch) {
                        if cancel.is_cancelled() {
                            yield ProgressUpdate::cancelled();
                            return;
                        }
                        let mut stream = index.clone().update(tag.clone(), batch, self.planner.clone(), read_file.clone()).await;
                        while let Some(update) = stream.next().await {
                            if matches!(update.status, IndexingStatus::Failed) {
                                yield update;
                                continue 'dirs;
                            }
                        }
                    }

                    step += 1;
                    let fraction = if total_steps == 0 { 1.0 } else { step as f32 / total_steps as f32 };
                    yield ProgressUpdate::new(fraction, format!("indexed {}", index.artifact_id().as_str()), IndexingStatus::Indexing);
                }
            }

            yield ProgressUpdate::done();
        })
    }

    /// Refresh exactly the given files, skipping any artifact whose plan
    /// filters down to nothing for them.
    pub fn refresh_files(
        self: Arc<Self>,
        files: Vec<PathBuf>,
        directory: String,
        branch: String,
        stat_file: StatFile,
        read_file: ReadFile,
    ) -> ProgressStream {
        Box::pin(async_stream::stream! {
            let file_set: std::collections::HashSet<PathBuf> = files.iter().cloned().collect();
            let mut file_stats = FileStats::new();
            for file in &files {
                if let Ok(stat) = stat_file(file) {
                    file_stats.insert(file.clone(), stat);
                }
            }

            let mut done = 0usize;
            let total = self.indexes.len();
            for index in &self.indexes {
                let tag = Tag::new(directory.clone(), branch.clone(), index.artifact_id());
                let plan = match self.planner.plan(&tag, &file_stats, read_file.clone()).await {
                    Ok(plan) => plan,
                    Err(err) => {
                        yield failed(&err);
                        continue;
                    }
                };
                let filtered = filter_plan(plan, &file_set);
                if filtered.is_empty() {
                    done += 1;
                    continue;
                }

                let mut stream = index.clone().update(tag, filtered, self.planner.clone(), read_file.clone()).await;
                while let Some(update) = stream.next().await {
                    if matches!(update.status, IndexingStatus::Failed) {
                        yield update;
                    }
                }
                done += 1;
                let fraction = if total == 0 { 1.0 } else { done as f32 / total as f32 };
                yield ProgressUpdate::new(fraction, format!("refreshed {}", index.artifact_id().as_str()), IndexingStatus::Indexing);
            }

            yield ProgressUpdate::done();
        })
    }
}

fn filter_plan(plan: cortex_domain::entities::RefreshPlan, files: &std::collections::HashSet<PathBuf>) -> cortex_domain::entities::RefreshPlan {
    cortex_domain::entities::RefreshPlan {
        compute: plan.compute.into_iter().filter(|i| files.contains(&i.path)).collect(),
        del: plan.del.into_iter().filter(|i| files.contains(&i.path)).collect(),
        add_tag: plan.add_tag.into_iter().filter(|i| files.contains(&i.path)).collect(),
        remove_tag: plan.remove_tag.into_iter().filter(|i| files.contains(&i.path)).collect(),
        touch_last_updated: plan.touch_last_updated.into_iter().filter(|i| files.contains(&i.path)).collect(),
    }
}

fn failed(err: &Error) -> ProgressUpdate {
    ProgressUpdate::failed(err.to_string(), should_clear_indexes(err))
}

/// Deletes the catalog file and the vector-store directory tree. Failures
/// are logged, not propagated: a partially-cleared index is still safer to
/// continue from than to leave the caller in an error state mid-recovery.
pub async fn clear_indexes(catalog_path: &Path, vector_store_dir: &Path) {
    if let Err(err) = tokio::fs::remove_file(catalog_path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %err, path = %catalog_path.display(), "failed to remove catalog file");
        }
    }
    if let Err(err) = tokio::fs::remove_dir_all(vector_store_dir).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %err, path = %vector_store_dir.display(), "failed to remove vector store directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::SmartChunker;
    use crate::indexes::ChunkIndex;
    use cortex_providers::catalog::SqliteCatalog;
    use cortex_providers::chunk_store::InMemoryChunkRepository;
    use std::collections::HashMap;
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

    fn stat_fn(sizes: HashMap<PathBuf, u64>) -> StatFile {
        Arc::new(move |path: &Path| {
            sizes
                .get(path)
                .map(|&size_bytes| FileStat { last_modified_ms: 0, size_bytes })
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        })
    }

    #[tokio::test]
    async fn refresh_files_skips_artifacts_with_empty_filtered_plan() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        let chunk_index: Arc<dyn ArtifactIndex> = Arc::new(ChunkIndex::new(chunk_repo.clone(), Arc::new(SmartChunker::new()), 200));
        let orchestrator = Arc::new(IndexerOrchestrator::new(planner, vec![chunk_index], DEFAULT_FILES_PER_BATCH));

        let file = dir.path().join("a.rs");
        let files = vec![file.clone()];
        let sizes = HashMap::from([(file.clone(), 20u64)]);
        let contents = HashMap::from([(file, b"fn main() {}".to_vec())]);

        let mut stream = orchestrator.refresh_files(files, dir.path().to_string_lossy().to_string(), "main".to_string(), stat_fn(sizes), read_fn(contents));
        let mut saw_done = false;
        while let Some(update) = stream.next().await {
            if matches!(update.status, IndexingStatus::Done) {
                saw_done = true;
            }
        }
        assert!(saw_done);
    }

    #[tokio::test]
    async fn cancelled_refresh_emits_a_single_cancelled_update() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = Arc::new(RefreshPlanner::new(catalog, 4));
        let chunk_repo = Arc::new(InMemoryChunkRepository::new());
        let chunk_index: Arc<dyn ArtifactIndex> = Arc::new(ChunkIndex::new(chunk_repo, Arc::new(SmartChunker::new()), 200));
        let orchestrator = Arc::new(IndexerOrchestrator::new(planner, vec![chunk_index], DEFAULT_FILES_PER_BATCH));

        let cancel = CancellationToken::new();
        cancel.cancel();
        let pause = Arc::new(AtomicBool::new(false));
        let mut stream = orchestrator.refresh_dirs(
            vec![dir.path().to_path_buf()],
            "main".to_string(),
            cancel,
            pause,
            stat_fn(HashMap::new()),
            read_fn(HashMap::new()),
        );

        let first = stream.next().await.unwrap();
        assert!(matches!(first.status, IndexingStatus::Cancelled));
        assert!(stream.next().await.is_none());
    }
}
