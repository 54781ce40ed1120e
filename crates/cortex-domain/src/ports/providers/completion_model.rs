//! Completion Model Port
//!
//! Contract for streaming text completions from a language model. Mirrors
//! [`super::embedding::EmbeddingProvider`]'s shape: a thin, pluggable seam
//! around whatever hosted or local model answers completion prompts. The
//! wire format of any specific hosted API is explicitly out of scope here.

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// A stream of raw text fragments as they arrive from the model.
pub type CompletionChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Produces streamed text completions for a rendered prompt.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Start streaming a completion for `prompt`, ending the stream early if
    /// the model itself supports stop sequences and honors `stop_tokens`.
    async fn stream(&self, prompt: &str, stop_tokens: &[String]) -> Result<CompletionChunkStream>;

    /// Identifier used to select model-family-specific stop tokens and
    /// prompt templates (e.g. "null", "openai:gpt-4o-mini").
    fn model_id(&self) -> &str;

    /// Identifier for logging and config validation (e.g. "null", "openai").
    fn provider_name(&self) -> &str;
}
