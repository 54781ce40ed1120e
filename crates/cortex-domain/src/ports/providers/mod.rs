//! External Provider Ports
//!
//! Ports for external services and providers that the domain depends on:
//! the durable catalog, embedding generation, vector storage and in-process
//! caching.

/// Cache provider port
pub mod cache;
/// Durable catalog port
pub mod catalog;
/// Completion model port
pub mod completion_model;
/// Embedding provider port
pub mod embedding;
/// Vector store provider port
pub mod vector_store;

pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
pub use catalog::{Catalog, CatalogMutation, SavedItem};
pub use completion_model::{CompletionChunkStream, CompletionModel};
pub use embedding::EmbeddingProvider;
pub use vector_store::VectorStoreProvider;
