//! Refresh planner
//!
//! Given a tag, a snapshot of file metadata and a way to read file bytes,
//! produces the [`RefreshPlan`] the indexer executes, and persists its
//! effects once the indexer confirms each item's artifact work is durable.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use cortex_domain::entities::{ArtifactId, FileStats, PathAndCacheKey, RefreshPlan, RefreshPlanKind, Tag};
use cortex_domain::error::Result;
use cortex_domain::ports::providers::{Catalog, CatalogMutation};
use sha2::{Digest, Sha256};
use tokio::sync::Semaphore;

/// Files larger than this are dropped from the snapshot before planning.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// A way to read a file's current bytes, injected so the planner stays
/// testable without touching the real filesystem.
pub type ReadFile = Arc<dyn Fn(&Path) -> Pin<Box<dyn Future<Output = std::io::Result<Vec<u8>>> + Send>> + Send + Sync>;

/// Produces and persists [`RefreshPlan`]s for a single per-artifact tag.
pub struct RefreshPlanner {
    catalog: Arc<dyn Catalog>,
    read_concurrency: usize,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Canonicalize a path for use as a comparison key, matching the other side
/// of the comparison (the catalog's stored paths) byte-for-byte on
/// case-sensitive filesystems, lowercased on Windows.
fn canonical_key(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(target_os = "windows") {
        s.to_lowercase()
    } else {
        s.into_owned()
    }
}

impl RefreshPlanner {
    /// Build a planner backed by `catalog`, bounding concurrent file reads
    /// during planning to `read_concurrency` in-flight operations.
    pub fn new(catalog: Arc<dyn Catalog>, read_concurrency: usize) -> Self {
        Self { catalog, read_concurrency }
    }

    /// Plan a refresh for `tag` given the current `file_stats` snapshot.
    ///
    /// `read_file` is only invoked for paths whose identity needs confirming
    /// (new paths, or previously-tracked paths whose mtime advanced).
    pub async fn plan(&self, tag: &Tag, file_stats: &FileStats, read_file: ReadFile) -> Result<RefreshPlan> {
        let file_stats: HashMap<PathBuf, _> = file_stats
            .iter()
            .filter(|(_, stat)| stat.size_bytes <= MAX_FILE_SIZE_BYTES)
            .map(|(p, s)| (p.clone(), *s))
            .collect();

        let saved = self.catalog.get_saved_items(tag).await?;

        // Group saved rows by canonicalized path: latest-timestamp row and the
        // full set of cache_keys ever seen for that path.
        struct PathGroup {
            latest_key: String,
            latest_updated_ms: u64,
            all_keys: Vec<String>,
        }
        let mut groups: HashMap<String, PathGroup> = HashMap::new();
        let mut seen_paths: HashMap<String, PathBuf> = HashMap::new();
        for item in &saved {
            let key = canonical_key(&item.item.path);
            seen_paths.insert(key.clone(), item.item.path.clone());
            let entry = groups.entry(key).or_insert_with(|| PathGroup {
                latest_key: item.item.cache_key.clone(),
                latest_updated_ms: item.last_updated_ms,
                all_keys: Vec::new(),
            });
            entry.all_keys.push(item.item.cache_key.clone());
            if item.last_updated_ms >= entry.latest_updated_ms {
                entry.latest_key = item.item.cache_key.clone();
                entry.latest_updated_ms = item.last_updated_ms;
            }
        }

        let mut remove: Vec<PathAndCacheKey> = Vec::new();
        let mut touch_last_updated: Vec<PathAndCacheKey> = Vec::new();
        let mut update_new_version: Vec<PathAndCacheKey> = Vec::new();
        let mut update_old_version: Vec<PathAndCacheKey> = Vec::new();

        let semaphore = Arc::new(Semaphore::new(self.read_concurrency.max(1)));
        let mut rehash_tasks = Vec::new();

        for (key, group) in &groups {
            let Some(path) = seen_paths.get(key) else { continue };
            match file_stats.get(path) {
                None => {
                    for cache_key in &group.all_keys {
                        remove.push(PathAndCacheKey::new(path.clone(), cache_key.clone()));
                    }
                }
                Some(stat) if stat.last_modified_ms <= group.latest_updated_ms => {
                    // Unchanged; nothing to do for this path.
                }
                Some(_) => {
                    let path = path.clone();
                    let latest_key = group.latest_key.clone();
                    let older_keys: Vec<String> =
                        group.all_keys.iter().filter(|k| **k != latest_key).cloned().collect();
                    let read_file = read_file.clone();
                    let semaphore = semaphore.clone();
                    rehash_tasks.push(async move {
                        let _permit = semaphore.acquire_owned().await.ok();
                        let bytes = read_file(&path).await;
                        (path, latest_key, older_keys, bytes)
                    });
                }
            }
        }

        for (path, latest_key, older_keys, bytes) in futures::future::join_all(rehash_tasks).await {
            let Ok(bytes) = bytes else { continue };
            let new_key = sha256_hex(&bytes);
            if new_key == latest_key {
                touch_last_updated.push(PathAndCacheKey::new(path.clone(), latest_key));
                for k in older_keys {
                    update_old_version.push(PathAndCacheKey::new(path.clone(), k));
                }
            } else {
                update_new_version.push(PathAndCacheKey::new(path.clone(), new_key));
                update_old_version.push(PathAndCacheKey::new(path.clone(), latest_key));
                for k in older_keys {
                    update_old_version.push(PathAndCacheKey::new(path.clone(), k));
                }
            }
        }

        // New paths not seen in the catalog at all.
        let mut add_tasks = Vec::new();
        for (path, _) in file_stats.iter() {
            if !groups.contains_key(&canonical_key(path)) {
                let path = path.clone();
                let read_file = read_file.clone();
                let semaphore = semaphore.clone();
                add_tasks.push(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    let bytes = read_file(&path).await;
                    (path, bytes)
                });
            }
        }
        let mut add: Vec<PathAndCacheKey> = Vec::new();
        for (path, bytes) in futures::future::join_all(add_tasks).await {
            let Ok(bytes) = bytes else { continue };
            add.push(PathAndCacheKey::new(path, sha256_hex(&bytes)));
        }

        // Classify add/update_new_version against the global cache: already
        // referenced elsewhere -> add_tag, otherwise -> compute. Classify
        // remove/update_old_version similarly: still referenced -> remove_tag,
        // otherwise -> del.
        let mut compute = Vec::new();
        let mut add_tag = Vec::new();
        for item in add.into_iter().chain(update_new_version.into_iter()) {
            let tags = self.catalog.get_tags_for(&item.cache_key, tag.artifact_id).await?;
            if tags.is_empty() {
                compute.push(item);
            } else {
                add_tag.push(item);
            }
        }

        let mut del = Vec::new();
        let mut remove_tag = Vec::new();
        for item in remove.into_iter().chain(update_old_version.into_iter()) {
            let tags = self.catalog.get_tags_for(&item.cache_key, tag.artifact_id).await?;
            let referenced_elsewhere = tags.iter().any(|t| t != tag);
            if referenced_elsewhere {
                remove_tag.push(item);
            } else {
                del.push(item);
            }
        }

        Ok(RefreshPlan {
            compute,
            del,
            add_tag,
            remove_tag,
            touch_last_updated,
        })
    }

    /// Persist the effects of `items` under `kind` for `tag`: the tag-catalog
    /// mutation always happens; `Compute`/`Add`/`UpdateNewVersion` additionally
    /// link the global cache, `Remove`/`Del`-equivalents unlink it.
    ///
    /// `UpdateOldVersion` is accounting-only and intentionally a no-op here,
    /// matching the planner's documented idempotence with respect to it.
    pub async fn complete(&self, tag: &Tag, items: &[PathAndCacheKey], kind: RefreshPlanKind) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let mutations: Vec<CatalogMutation> = items
            .iter()
            .map(|item| CatalogMutation { item: item.clone(), kind })
            .collect();
        self.catalog.apply(tag, &mutations).await?;

        match kind {
            RefreshPlanKind::Compute | RefreshPlanKind::Add | RefreshPlanKind::UpdateNewVersion => {
                for item in items {
                    self.catalog
                        .global_cache_insert(&item.cache_key, tag.artifact_id, tag)
                        .await?;
                }
            }
            RefreshPlanKind::Remove => {
                for item in items {
                    self.catalog
                        .global_cache_remove(&item.cache_key, tag.artifact_id, tag)
                        .await?;
                }
            }
            RefreshPlanKind::UpdateLastUpdated | RefreshPlanKind::UpdateOldVersion => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_providers::catalog::SqliteCatalog;
    use std::collections::HashMap as StdHashMap;
    use std::sync::Mutex;

    fn read_fn(files: Arc<Mutex<StdHashMap<PathBuf, Vec<u8>>>>) -> ReadFile {
        Arc::new(move |path: &Path| {
            let files = files.clone();
            let path = path.to_path_buf();
            Box::pin(async move {
                files
                    .lock()
                    .unwrap()
                    .get(&path)
                    .cloned()
                    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
            })
        })
    }

    fn tag() -> Tag {
        Tag::new("/repo", "main", ArtifactId::Chunks)
    }

    #[tokio::test]
    async fn new_file_plans_as_compute() {
        let dir = tempfile::tempdir().unwrap();
        let catalog: Arc<dyn Catalog> =
            Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = RefreshPlanner::new(catalog, 4);

        let files = Arc::new(Mutex::new(StdHashMap::from([(
            PathBuf::from("/repo/a.rs"),
            b"fn main() {}".to_vec(),
        )])));
        let mut stats = FileStats::new();
        stats.insert(
            PathBuf::from("/repo/a.rs"),
            cortex_domain::entities::FileStat { last_modified_ms: 1, size_bytes: 12 },
        );

        let plan = planner.plan(&tag(), &stats, read_fn(files)).await.unwrap();
        assert_eq!(plan.compute.len(), 1);
        assert!(plan.del.is_empty());
    }

    #[tokio::test]
    async fn replaying_unchanged_plan_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog: Arc<dyn Catalog> =
            Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = RefreshPlanner::new(catalog, 4);

        let files = Arc::new(Mutex::new(StdHashMap::from([(
            PathBuf::from("/repo/a.rs"),
            b"fn main() {}".to_vec(),
        )])));
        let mut stats = FileStats::new();
        stats.insert(
            PathBuf::from("/repo/a.rs"),
            cortex_domain::entities::FileStat { last_modified_ms: 1, size_bytes: 12 },
        );

        let plan = planner.plan(&tag(), &stats, read_fn(files.clone())).await.unwrap();
        planner.complete(&tag(), &plan.compute, RefreshPlanKind::Compute).await.unwrap();

        let plan2 = planner.plan(&tag(), &stats, read_fn(files)).await.unwrap();
        assert!(plan2.is_empty(), "{plan2:?}");
    }

    #[tokio::test]
    async fn deleted_file_plans_as_del() {
        let dir = tempfile::tempdir().unwrap();
        let catalog: Arc<dyn Catalog> =
            Arc::new(SqliteCatalog::open(&dir.path().join("c.sqlite3"), 3000).unwrap());
        let planner = RefreshPlanner::new(catalog, 4);

        let files = Arc::new(Mutex::new(StdHashMap::from([(
            PathBuf::from("/repo/a.rs"),
            b"fn main() {}".to_vec(),
        )])));
        let mut stats = FileStats::new();
        stats.insert(
            PathBuf::from("/repo/a.rs"),
            cortex_domain::entities::FileStat { last_modified_ms: 1, size_bytes: 12 },
        );
        let plan = planner.plan(&tag(), &stats, read_fn(files)).await.unwrap();
        planner.complete(&tag(), &plan.compute, RefreshPlanKind::Compute).await.unwrap();

        let plan2 = planner.plan(&tag(), &FileStats::new(), read_fn(Arc::new(Mutex::new(StdHashMap::new())))).await.unwrap();
        assert_eq!(plan2.del.len(), 1);
    }
}
