//! Vector store provider configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which vector store provider the composition root should wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreProviderKind {
    /// In-process HashMap-backed store, lost on restart
    #[default]
    Memory,
    /// On-disk, JSON-shard-backed store
    Filesystem,
}

/// Vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Provider selection
    pub provider: VectorStoreProviderKind,

    /// On-disk root for the filesystem provider
    pub path: Option<PathBuf>,

    /// Embedding dimensions stored vectors are expected to have
    pub dimensions: usize,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: VectorStoreProviderKind::default(),
            path: None,
            dimensions: crate::constants::EMBEDDING_DIMENSION_DEFAULT,
        }
    }
}
