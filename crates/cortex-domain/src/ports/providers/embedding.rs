//! Embedding Provider Port
//!
//! Contract for turning text into vectors for the semantic (vector) per-artifact
//! index. Implementations are minimal, pluggable shims — the wire format and
//! business terms of any hosted embedding API are explicitly out of scope.

use crate::error::Result;
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Generates semantic embeddings for text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single piece of text.
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Embed a batch of texts, preserving input order in the output.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Dimensionality of vectors this provider produces.
    fn dimensions(&self) -> usize;

    /// Identifier for logging and config validation (e.g. "null", "openai", "ollama").
    fn provider_name(&self) -> &str;
}
