//! Embedding Provider Implementations
//!
//! Converts text into dense vector embeddings for the semantic (vector)
//! per-artifact index.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`NullEmbeddingProvider`] | Deterministic hash-based vectors, no network |
//! | [`OllamaEmbeddingProvider`] | Local Ollama server |
//! | [`OpenAIEmbeddingProvider`] | OpenAI embeddings API |

pub mod null;
pub mod ollama;
pub mod openai;

pub use null::NullEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAIEmbeddingProvider;
