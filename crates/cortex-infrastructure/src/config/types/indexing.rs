//! Indexing and chunking configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Indexer orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Files larger than this (bytes) are excluded before planning
    pub max_file_size_bytes: u64,

    /// Number of files processed per refresh batch
    pub files_per_batch: usize,

    /// Concurrency cap on file reads/hashing during planning
    pub planner_read_concurrency: usize,

    /// Poll interval while an indexing run is paused
    pub pause_poll_interval_ms: u64,

    /// Chunking options applied by every language processor
    pub chunking: ChunkingConfig,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_INDEXABLE_FILE_SIZE_BYTES,
            files_per_batch: DEFAULT_FILES_PER_BATCH,
            planner_read_concurrency: DEFAULT_PLANNER_READ_CONCURRENCY,
            pause_poll_interval_ms: PAUSE_POLL_INTERVAL_MS,
            chunking: ChunkingConfig::default(),
        }
    }
}

/// Chunking configuration shared by all language processors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in approximate tokens
    pub max_chunk_size: usize,

    /// Files larger than this (character count) are excluded from chunking
    pub max_chunkable_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE_TOKENS,
            max_chunkable_chars: MAX_CHUNKABLE_CHAR_COUNT,
        }
    }
}
