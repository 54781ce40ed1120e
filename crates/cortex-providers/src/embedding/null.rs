//! Null embedding provider
//!
//! Deterministic, hash-based embeddings with no external dependencies.
//! Default provider when no `embedding` section is configured.

use async_trait::async_trait;
use cortex_domain::error::Result;
use cortex_domain::ports::providers::EmbeddingProvider;
use cortex_domain::value_objects::Embedding;

use crate::constants::EMBEDDING_DIMENSION_NULL;

/// Returns fixed-size vectors derived from a character-sum hash of the input.
#[derive(Debug, Clone, Default)]
pub struct NullEmbeddingProvider;

impl NullEmbeddingProvider {
    /// Create a new null embedding provider.
    pub fn new() -> Self {
        Self
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let hash = text.chars().map(|c| c as u32).sum::<u32>();
        let base_value = (hash % 1000) as f32 / 1000.0;
        let vector = (0..EMBEDDING_DIMENSION_NULL)
            .map(|j| {
                let variation = (j as f32 * 0.01).sin();
                (base_value + variation * 0.1).clamp(0.0, 1.0)
            })
            .collect();

        Embedding {
            vector,
            model: "null".to_string(),
            dimensions: EMBEDDING_DIMENSION_NULL,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_one(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSION_NULL
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embed_is_deterministic() {
        let provider = NullEmbeddingProvider::new();
        let a = provider.embed("hello").await.unwrap();
        let b = provider.embed("hello").await.unwrap();
        assert_eq!(a.vector, b.vector);
        assert_eq!(a.dimensions, EMBEDDING_DIMENSION_NULL);
    }

    #[tokio::test]
    async fn embed_batch_preserves_order() {
        let provider = NullEmbeddingProvider::new();
        let texts = vec!["a".to_string(), "b".to_string()];
        let batch = provider.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].vector, provider.embed("a").await.unwrap().vector);
    }
}
