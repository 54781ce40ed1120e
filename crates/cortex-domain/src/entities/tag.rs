//! Tag and content-addressed identity types
//!
//! These are the coordinates every catalog row and cache entry is keyed by.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Identifies a specific per-artifact index for a workspace/branch pair.
///
/// Tags partition the catalog: the same file content can be tracked under
/// several tags simultaneously (e.g. once per branch, once per artifact kind)
/// without the rows colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Workspace root URI
    pub directory: String,
    /// VCS branch name; empty string is permitted for untracked workspaces
    pub branch: String,
    /// Which per-artifact index this tag belongs to
    pub artifact_id: ArtifactId,
}

impl Tag {
    /// Build a tag for the given directory/branch/artifact triple.
    pub fn new(directory: impl Into<String>, branch: impl Into<String>, artifact_id: ArtifactId) -> Self {
        Self {
            directory: directory.into(),
            branch: branch.into(),
            artifact_id,
        }
    }
}

/// Which per-artifact index a tag or row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactId {
    /// Raw AST-chunked code snippets
    Chunks,
    /// Embedding vectors over chunks
    Vector,
    /// Full-text (trigram) search index
    Fts,
    /// Ad-hoc code snippets surfaced to the completion pipeline
    Snippets,
    /// Synthetic artifact backing the cross-tag global cache itself
    GlobalCache,
}

impl ArtifactId {
    /// Stable string form, used as a SQL column value and in tests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactId::Chunks => "chunks",
            ArtifactId::Vector => "vector",
            ArtifactId::Fts => "fts",
            ArtifactId::Snippets => "snippets",
            ArtifactId::GlobalCache => "globalCache",
        }
    }
}

/// The canonical identity of a stored artifact version: a workspace-absolute
/// path paired with the lowercase hex SHA-256 of the file's current bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathAndCacheKey {
    /// Absolute workspace-relative path
    pub path: PathBuf,
    /// Lowercase hex SHA-256 digest of the file's current contents
    pub cache_key: String,
}

impl PathAndCacheKey {
    /// Pair a path with its content hash.
    pub fn new(path: PathBuf, cache_key: impl Into<String>) -> Self {
        Self {
            path,
            cache_key: cache_key.into(),
        }
    }
}

/// Per-file metadata collected during a directory walk, keyed by absolute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Last-modified time, milliseconds since the Unix epoch
    pub last_modified_ms: u64,
    /// File size in bytes
    pub size_bytes: u64,
}

/// A directory walk's observed file metadata.
pub type FileStats = HashMap<PathBuf, FileStat>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_id_round_trips_through_str() {
        assert_eq!(ArtifactId::Chunks.as_str(), "chunks");
        assert_eq!(ArtifactId::GlobalCache.as_str(), "globalCache");
    }

    #[test]
    fn tags_with_different_branches_are_distinct() {
        let a = Tag::new("/repo", "main", ArtifactId::Chunks);
        let b = Tag::new("/repo", "feature", ArtifactId::Chunks);
        assert_ne!(a, b);
    }
}
