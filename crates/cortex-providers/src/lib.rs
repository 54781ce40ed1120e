// Allow collapsible_if for complex conditional logic
#![allow(clippy::collapsible_if)]

//! # Context Browser - Provider Implementations
//!
//! This crate contains user-selectable provider implementations following
//! Clean Architecture principles. Each provider implements a port (trait)
//! defined in `cortex-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Catalog | `Catalog` | SQLite (the only backend) |
//! | Embedding | `EmbeddingProvider` | OpenAI, Ollama, Null |
//! | Vector Store | `VectorStoreProvider` | InMemory, Filesystem, Null |
//! | Cache | `CacheProvider` | Moka, Null |
//!
//! ## Feature Flags
//!
//! Each provider can be enabled/disabled via feature flags for minimal builds:
//!
//! ```toml
//! [dependencies]
//! cortex-providers = { version = "0.1", default-features = false, features = ["embedding-ollama", "cache-moka"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cortex_providers::embedding::OllamaEmbeddingProvider;
//! use cortex_providers::cache::MokaCacheProvider;
//! ```

pub use cortex_domain::error::{Error, Result};
pub use cortex_domain::ports::providers::{
    CacheProvider, Catalog, CompletionModel, EmbeddingProvider, VectorStoreProvider,
};
pub use cortex_domain::ports::IdeContext;

/// Durable catalog provider implementations
pub mod catalog;

/// Completion model implementations
///
/// Implements `CompletionModel` for the completion orchestrator's streaming prompts.
pub mod completion_model;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Embedding provider implementations
///
/// Implements `EmbeddingProvider` trait for various embedding APIs.
pub mod embedding;

/// Vector store provider implementations
///
/// Implements `VectorStoreProvider` trait for vector storage backends.
pub mod vector_store;

/// Cache provider implementations
///
/// Implements `CacheProvider` trait for caching backends.
pub mod cache;

/// Chunk repository implementations
///
/// Implements `ChunkRepository` for the chunk per-artifact index.
pub mod chunk_store;

/// Search repository implementations
///
/// Implements `SearchRepository` for the full-text/hybrid per-artifact index.
pub mod search;

/// IDE collaborator implementations
///
/// Implements `IdeContext` for editor-side symbol resolution.
pub mod ide;
