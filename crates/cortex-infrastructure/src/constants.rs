//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `cortex_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cortex.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cortex";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CORTEX";

// ============================================================================
// INDEXING CONSTANTS
// ============================================================================

/// Files larger than this are excluded from indexing entirely
pub const MAX_INDEXABLE_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Files larger than this (by character count) are excluded from chunking
pub const MAX_CHUNKABLE_CHAR_COUNT: usize = 1024 * 1024;

/// Default number of files per refresh batch
pub const DEFAULT_FILES_PER_BATCH: usize = 500;

/// Concurrency cap on file reads/hashing during planning
pub const DEFAULT_PLANNER_READ_CONCURRENCY: usize = 10;

/// Pause-token poll interval while an indexing run is paused
pub const PAUSE_POLL_INTERVAL_MS: u64 = 100;

// ============================================================================
// CHUNKING CONSTANTS
// ============================================================================

/// Default maximum chunk size in approximate tokens
pub const DEFAULT_MAX_CHUNK_SIZE_TOKENS: usize = 512;

/// Reserved token headroom subtracted before starting a new basic-mode chunk
pub const BASIC_CHUNK_TOKEN_HEADROOM: usize = 5;

// ============================================================================
// CATALOG CONSTANTS
// ============================================================================

/// Default catalog database file name
pub const DEFAULT_CATALOG_FILENAME: &str = "catalog.sqlite3";

/// SQLite busy timeout in milliseconds
pub const CATALOG_BUSY_TIMEOUT_MS: u32 = 3000;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default in-memory LRU cache capacity (entries)
pub const DEFAULT_LRU_CACHE_CAPACITY: u64 = 100;

/// Default cache TTL in seconds
pub const CACHE_DEFAULT_TTL_SECS: u64 = 3600;

// ============================================================================
// COMPLETION PIPELINE CONSTANTS
// ============================================================================

/// Hard timeout per snippet source during parallel collection
pub const SNIPPET_COLLECTION_TIMEOUT_MS: u64 = 100;

/// How long a displayed completion waits for an explicit accept before rejection
pub const COMPLETION_REJECTION_TIMEOUT_SECS: u64 = 10;

/// Window in which a second displayed completion can cancel the prior's rejection timer
pub const COMPLETION_DEDUP_WINDOW_MS: u64 = 500;

/// Default debounce delay applied to completion triggers
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 250;

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider dimension (for testing)
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Default embedding dimension (for providers that don't specify)
pub const EMBEDDING_DIMENSION_DEFAULT: usize = 512;

// ============================================================================
// HTTP CLIENT POOL CONSTANTS (embedding API calls)
// ============================================================================

/// HTTP client request timeout in seconds
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client idle timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// Maximum idle connections per host in HTTP client pool
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

// ============================================================================
// HYBRID SEARCH (BM25 + semantic) CONSTANTS
// ============================================================================

/// BM25 k1 parameter - controls term frequency saturation
pub const HYBRID_SEARCH_BM25_K1: f64 = 1.2;

/// BM25 b parameter - controls document length normalization
pub const HYBRID_SEARCH_BM25_B: f64 = 0.75;

/// Default BM25 weight in hybrid search (0.4 = 40% keyword-based)
pub const HYBRID_SEARCH_BM25_WEIGHT: f64 = 0.4;

/// Default semantic weight in hybrid search (0.6 = 60% embedding-based)
pub const HYBRID_SEARCH_SEMANTIC_WEIGHT: f64 = 0.6;

/// Maximum number of results to retrieve from each search method before fusion
pub const HYBRID_SEARCH_MAX_CANDIDATES: usize = 100;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log file rotation size in bytes (10MB)
pub const LOG_ROTATION_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of log files to keep
pub const LOG_MAX_FILES: usize = 5;

// Re-export domain constants for convenience
pub use cortex_domain::constants::*;
