//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in cortex-domain) and infrastructure constants.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider dimension
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama all-minilm dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MINILM: usize = 384;

/// Ollama mxbai-embed-large dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MXBAI: usize = 1024;

/// Ollama snowflake-arctic-embed dimension
pub const EMBEDDING_DIMENSION_OLLAMA_ARCTIC: usize = 768;

/// Ollama default dimension
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

/// Default embedding dimension (for providers that don't specify)
pub const EMBEDDING_DIMENSION_DEFAULT: usize = 512;

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

// ============================================================================
// HYBRID SEARCH CONSTANTS
// ============================================================================

/// BM25 weight in hybrid search (0.0-1.0), default 40% BM25
pub const HYBRID_SEARCH_BM25_WEIGHT: f32 = 0.4;

/// Semantic weight in hybrid search (0.0-1.0), default 60% semantic
pub const HYBRID_SEARCH_SEMANTIC_WEIGHT: f32 = 0.6;

/// BM25 k1 parameter (term frequency saturation, standard tuning value)
pub const HYBRID_SEARCH_BM25_K1: f32 = 1.2;

/// BM25 b parameter (document length normalization, standard tuning value)
pub const HYBRID_SEARCH_BM25_B: f32 = 0.75;
