//! Null completion model
//!
//! Produces no text. Selected when no completion model is configured; the
//! completion orchestrator treats an empty stream as "no suggestion" rather
//! than as an error, the same way the indexer omits the vector artifact
//! when [`NullEmbeddingProvider`](crate::embedding::NullEmbeddingProvider)
//! is in play.

use async_trait::async_trait;
use cortex_domain::error::Result;
use cortex_domain::ports::providers::{CompletionChunkStream, CompletionModel};
use futures::stream;

/// Always streams zero chunks.
#[derive(Debug, Clone, Default)]
pub struct NullCompletionModel;

impl NullCompletionModel {
    /// Create a new null completion model.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionModel for NullCompletionModel {
    async fn stream(&self, _prompt: &str, _stop_tokens: &[String]) -> Result<CompletionChunkStream> {
        Ok(Box::pin(stream::empty()))
    }

    fn model_id(&self) -> &str {
        "null"
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn stream_yields_nothing() {
        let model = NullCompletionModel::new();
        let mut stream = model.stream("fn main() {", &[]).await.unwrap();
        assert!(stream.next().await.is_none());
    }
}
