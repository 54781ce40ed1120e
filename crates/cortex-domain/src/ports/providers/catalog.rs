//! Durable Catalog Port
//!
//! Contract for the content-addressed index of what has already been indexed,
//! per tag. Implementations persist this durably (SQLite) so that restarting
//! the process does not force a full re-index.

use crate::entities::{ArtifactId, PathAndCacheKey, RefreshPlanKind, Tag};
use crate::error::Result;
use async_trait::async_trait;

/// A single row as stored for a tag: the path/content identity plus when it
/// was last touched.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItem {
    /// Content identity of the stored item
    pub item: PathAndCacheKey,
    /// Milliseconds-since-epoch this row was last written
    pub last_updated_ms: u64,
}

/// A single catalog mutation to apply for a tag, produced by the refresh planner.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMutation {
    /// The path/content identity this mutation applies to
    pub item: PathAndCacheKey,
    /// What kind of mutation this is
    pub kind: RefreshPlanKind,
}

/// Durable, content-addressed catalog of what has been indexed.
///
/// Implementations MUST uphold the uniqueness invariants from the data model:
/// no two tag-catalog rows share `(directory, branch, artifact_id, path,
/// cache_key)`, and no two global-cache rows share `(cache_key, directory,
/// branch, artifact_id)`.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List everything currently tracked for a tag.
    async fn get_saved_items(&self, tag: &Tag) -> Result<Vec<SavedItem>>;

    /// List every tag that currently references `cache_key` under `artifact_id`
    /// in the global cache. An empty result means this content is not tracked
    /// anywhere yet.
    async fn get_tags_for(&self, cache_key: &str, artifact_id: ArtifactId) -> Result<Vec<Tag>>;

    /// Apply a batch of mutations for a single tag.
    ///
    /// `Compute`/`Add`/`UpdateNewVersion` upsert `(path, cache_key, now)` for
    /// the tag; `Remove` deletes the matching row; `UpdateLastUpdated`
    /// rewrites only `cache_key` and timestamp for `(path, tag)`;
    /// `UpdateOldVersion` is a no-op kept only for caller accounting.
    async fn apply(&self, tag: &Tag, mutations: &[CatalogMutation]) -> Result<()>;

    /// Link `cache_key` under `artifact_id` to `tag` in the global cache
    /// (used by `Compute`/`Add` completions).
    async fn global_cache_insert(&self, cache_key: &str, artifact_id: ArtifactId, tag: &Tag) -> Result<()>;

    /// Unlink `cache_key` under `artifact_id` from `tag` in the global cache
    /// (used by `Remove`/`Del` completions).
    async fn global_cache_remove(&self, cache_key: &str, artifact_id: ArtifactId, tag: &Tag) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn catalog_mutation_carries_kind_and_item() {
        let mutation = CatalogMutation {
            item: PathAndCacheKey::new(PathBuf::from("/a"), "k"),
            kind: RefreshPlanKind::Compute,
        };
        assert_eq!(mutation.kind, RefreshPlanKind::Compute);
        assert_eq!(mutation.item.cache_key, "k");
    }
}
