//! Configuration loading and typed configuration sections

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    AppConfig, CacheConfig, CatalogConfig, CompletionConfig, CompletionModelProviderKind,
    EmbeddingConfig, EmbeddingProviderKind, IndexingConfig, LoggingConfig, VectorStoreConfig,
    VectorStoreProviderKind,
};
