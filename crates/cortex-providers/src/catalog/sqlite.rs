//! SQLite-backed durable catalog
//!
//! `rusqlite::Connection` is not `Send`-safe to hold across an await point
//! while in use, so every query runs inside `spawn_blocking` behind a
//! `std::sync::Mutex`. No logical transaction is ever suspended mid-await.

use async_trait::async_trait;
use cortex_domain::entities::{ArtifactId, PathAndCacheKey, RefreshPlanKind, Tag};
use cortex_domain::error::{Error, Result};
use cortex_domain::ports::providers::{Catalog, CatalogMutation, SavedItem};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::spawn_blocking;

const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS tag_catalog (
    id INTEGER PRIMARY KEY,
    dir TEXT NOT NULL,
    branch TEXT NOT NULL,
    artifact_id TEXT NOT NULL,
    path TEXT NOT NULL,
    cache_key TEXT NOT NULL,
    last_updated INTEGER NOT NULL,
    UNIQUE(dir, branch, artifact_id, path, cache_key)
);

CREATE INDEX IF NOT EXISTS idx_tag_catalog_tag ON tag_catalog(dir, branch, artifact_id);

CREATE TABLE IF NOT EXISTS global_cache (
    id INTEGER PRIMARY KEY,
    cache_key TEXT NOT NULL,
    dir TEXT NOT NULL,
    branch TEXT NOT NULL,
    artifact_id TEXT NOT NULL,
    UNIQUE(cache_key, dir, branch, artifact_id)
);

CREATE INDEX IF NOT EXISTS idx_global_cache_key ON global_cache(cache_key, artifact_id);
"#;

/// Durable, content-addressed catalog backed by a single SQLite file.
pub struct SqliteCatalog {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl SqliteCatalog {
    /// Open (creating if absent) the catalog database at `path`, applying the
    /// schema and a `busy_timeout_ms` millisecond SQLite busy timeout.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::database_with_source("failed to create catalog directory", e))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::database_with_source("failed to open catalog database", e))?;
        conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms as u64))
            .map_err(|e| Error::database_with_source("failed to set busy timeout", e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::database_with_source("failed to initialize catalog schema", e))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_path_buf(),
        })
    }

    /// Database file path this catalog was opened against.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard)
        })
        .await
        .map_err(|e| Error::database_with_source("catalog worker task failed", e))?
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait]
impl Catalog for SqliteCatalog {
    async fn get_saved_items(&self, tag: &Tag) -> Result<Vec<SavedItem>> {
        let tag = tag.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT path, cache_key, last_updated FROM tag_catalog \
                     WHERE dir = ?1 AND branch = ?2 AND artifact_id = ?3",
                )
                .map_err(|e| Error::database_with_source("failed to prepare saved-items query", e))?;

            let rows = stmt
                .query_map(
                    params![tag.directory, tag.branch, tag.artifact_id.as_str()],
                    |row| {
                        let path: String = row.get(0)?;
                        let cache_key: String = row.get(1)?;
                        let last_updated_ms: i64 = row.get(2)?;
                        Ok(SavedItem {
                            item: PathAndCacheKey::new(PathBuf::from(path), cache_key),
                            last_updated_ms: last_updated_ms as u64,
                        })
                    },
                )
                .map_err(|e| Error::database_with_source("failed to query saved items", e))?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::database_with_source("failed to read saved-items row", e))
        })
        .await
    }

    async fn get_tags_for(&self, cache_key: &str, artifact_id: ArtifactId) -> Result<Vec<Tag>> {
        let cache_key = cache_key.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT dir, branch FROM global_cache WHERE cache_key = ?1 AND artifact_id = ?2",
                )
                .map_err(|e| Error::database_with_source("failed to prepare tags-for query", e))?;

            let rows = stmt
                .query_map(params![cache_key, artifact_id.as_str()], |row| {
                    let dir: String = row.get(0)?;
                    let branch: String = row.get(1)?;
                    Ok(Tag::new(dir, branch, artifact_id))
                })
                .map_err(|e| Error::database_with_source("failed to query tags", e))?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::database_with_source("failed to read tags-for row", e))
        })
        .await
    }

    async fn apply(&self, tag: &Tag, mutations: &[CatalogMutation]) -> Result<()> {
        let tag = tag.clone();
        let mutations = mutations.to_vec();
        self.with_conn(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| Error::database_with_source("failed to start catalog transaction", e))?;

            let now = now_ms() as i64;
            for mutation in &mutations {
                let path = mutation.item.path.to_string_lossy();
                match mutation.kind {
                    RefreshPlanKind::Compute
                    | RefreshPlanKind::Add
                    | RefreshPlanKind::UpdateNewVersion => {
                        tx.execute(
                            "INSERT INTO tag_catalog (dir, branch, artifact_id, path, cache_key, last_updated) \
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                             ON CONFLICT(dir, branch, artifact_id, path, cache_key) \
                             DO UPDATE SET last_updated = excluded.last_updated",
                            params![
                                tag.directory,
                                tag.branch,
                                tag.artifact_id.as_str(),
                                path,
                                mutation.item.cache_key,
                                now,
                            ],
                        )
                        .map_err(|e| Error::database_with_source("failed to upsert tag-catalog row", e))?;
                    }
                    RefreshPlanKind::Remove => {
                        tx.execute(
                            "DELETE FROM tag_catalog \
                             WHERE dir = ?1 AND branch = ?2 AND artifact_id = ?3 AND path = ?4",
                            params![tag.directory, tag.branch, tag.artifact_id.as_str(), path],
                        )
                        .map_err(|e| Error::database_with_source("failed to delete tag-catalog row", e))?;
                    }
                    RefreshPlanKind::UpdateLastUpdated => {
                        tx.execute(
                            "UPDATE tag_catalog SET cache_key = ?1, last_updated = ?2 \
                             WHERE dir = ?3 AND branch = ?4 AND artifact_id = ?5 AND path = ?6",
                            params![
                                mutation.item.cache_key,
                                now,
                                tag.directory,
                                tag.branch,
                                tag.artifact_id.as_str(),
                                path,
                            ],
                        )
                        .map_err(|e| Error::database_with_source("failed to touch tag-catalog row", e))?;
                    }
                    RefreshPlanKind::UpdateOldVersion => {}
                }
            }

            tx.commit()
                .map_err(|e| Error::database_with_source("failed to commit catalog transaction", e))
        })
        .await
    }

    async fn global_cache_insert(&self, cache_key: &str, artifact_id: ArtifactId, tag: &Tag) -> Result<()> {
        let cache_key = cache_key.to_string();
        let tag = tag.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO global_cache (cache_key, dir, branch, artifact_id) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![cache_key, tag.directory, tag.branch, artifact_id.as_str()],
            )
            .map_err(|e| Error::database_with_source("failed to insert global-cache row", e))?;
            Ok(())
        })
        .await
    }

    async fn global_cache_remove(&self, cache_key: &str, artifact_id: ArtifactId, tag: &Tag) -> Result<()> {
        let cache_key = cache_key.to_string();
        let tag = tag.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM global_cache WHERE cache_key = ?1 AND dir = ?2 AND branch = ?3 AND artifact_id = ?4",
                params![cache_key, tag.directory, tag.branch, artifact_id.as_str()],
            )
            .map_err(|e| Error::database_with_source("failed to delete global-cache row", e))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tag() -> Tag {
        Tag::new("/repo", "main", ArtifactId::Chunks)
    }

    #[tokio::test]
    async fn apply_compute_then_get_saved_items_round_trips() {
        let dir = tempdir().unwrap();
        let catalog = SqliteCatalog::open(&dir.path().join("catalog.sqlite3"), 3000).unwrap();

        let mutation = CatalogMutation {
            item: PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc"),
            kind: RefreshPlanKind::Compute,
        };
        catalog.apply(&tag(), &[mutation]).await.unwrap();

        let saved = catalog.get_saved_items(&tag()).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].item.cache_key, "abc");
    }

    #[tokio::test]
    async fn global_cache_insert_then_get_tags_for_returns_tag() {
        let dir = tempdir().unwrap();
        let catalog = SqliteCatalog::open(&dir.path().join("catalog.sqlite3"), 3000).unwrap();

        catalog
            .global_cache_insert("abc", ArtifactId::Chunks, &tag())
            .await
            .unwrap();
        let tags = catalog.get_tags_for("abc", ArtifactId::Chunks).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].directory, "/repo");

        catalog
            .global_cache_remove("abc", ArtifactId::Chunks, &tag())
            .await
            .unwrap();
        let tags = catalog.get_tags_for("abc", ArtifactId::Chunks).await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn remove_mutation_deletes_row() {
        let dir = tempdir().unwrap();
        let catalog = SqliteCatalog::open(&dir.path().join("catalog.sqlite3"), 3000).unwrap();

        let item = PathAndCacheKey::new(PathBuf::from("/repo/a.rs"), "abc");
        catalog
            .apply(
                &tag(),
                &[CatalogMutation { item: item.clone(), kind: RefreshPlanKind::Compute }],
            )
            .await
            .unwrap();
        catalog
            .apply(&tag(), &[CatalogMutation { item, kind: RefreshPlanKind::Remove }])
            .await
            .unwrap();

        assert!(catalog.get_saved_items(&tag()).await.unwrap().is_empty());
    }
}
