//! Embedding provider configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Which embedding provider the composition root should wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Deterministic zero-dependency provider, used for tests and offline indexing
    #[default]
    Null,
    /// OpenAI-compatible embeddings HTTP API
    Openai,
    /// Local Ollama embeddings HTTP API
    Ollama,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider selection
    pub provider: EmbeddingProviderKind,

    /// Model name passed to the provider
    pub model: String,

    /// Base URL for API providers
    pub base_url: Option<String>,

    /// API key for API providers (read from environment in practice)
    pub api_key: Option<String>,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// HTTP request timeout in seconds (API providers only)
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: "null".to_string(),
            base_url: None,
            api_key: None,
            dimensions: EMBEDDING_DIMENSION_DEFAULT,
            request_timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}
