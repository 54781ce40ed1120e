//! Main application configuration

use serde::{Deserialize, Serialize};

// Re-export all config types
pub use super::{
    cache::CacheConfig, catalog::CatalogConfig,
    completion::{CompletionConfig, CompletionModelProviderKind},
    embedding::{EmbeddingConfig, EmbeddingProviderKind},
    indexing::IndexingConfig,
    logging::LoggingConfig,
    vector_store::{VectorStoreConfig, VectorStoreProviderKind},
};

/// Root configuration for the indexing core and completion pipeline.
///
/// Loaded once at process start by [`crate::config::ConfigLoader`] and passed by
/// reference to every service that needs it; nothing reads configuration from
/// global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Indexer orchestrator and chunking configuration
    pub indexing: IndexingConfig,

    /// Streaming completion pipeline configuration
    pub completion: CompletionConfig,

    /// Durable catalog (SQLite) configuration
    pub catalog: CatalogConfig,

    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,

    /// Vector store provider configuration
    pub vector_store: VectorStoreConfig,

    /// In-process LRU cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}
