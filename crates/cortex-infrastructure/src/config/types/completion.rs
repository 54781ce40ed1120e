//! Completion pipeline configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Which completion model the composition root should wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionModelProviderKind {
    /// Deterministic zero-dependency provider, streams nothing
    #[default]
    Null,
    /// OpenAI-compatible chat-completions API
    Openai,
}

/// Streaming completion orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Model provider selection
    pub model_provider: CompletionModelProviderKind,

    /// Model name passed to the provider
    pub model: String,

    /// Base URL for API providers
    pub base_url: Option<String>,

    /// API key for API providers (read from environment in practice)
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds (API providers only)
    pub request_timeout_secs: u64,

    /// Debounce delay applied to completion triggers
    pub debounce_delay_ms: u64,

    /// Hard timeout for each snippet source race during collection
    pub snippet_collection_timeout_ms: u64,

    /// How long a displayed completion waits before being auto-rejected
    pub rejection_timeout_secs: u64,

    /// Window in which a follow-up completion can cancel the prior rejection timer
    pub dedup_window_ms: u64,

    /// Token budget for the rendered prompt
    pub prompt_token_budget: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model_provider: CompletionModelProviderKind::default(),
            model: "null".to_string(),
            base_url: None,
            api_key: None,
            request_timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            snippet_collection_timeout_ms: SNIPPET_COLLECTION_TIMEOUT_MS,
            rejection_timeout_secs: COMPLETION_REJECTION_TIMEOUT_SECS,
            dedup_window_ms: COMPLETION_DEDUP_WINDOW_MS,
            prompt_token_budget: DEFAULT_MAX_CHUNK_SIZE_TOKENS * 4,
        }
    }
}
