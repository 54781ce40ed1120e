//! Application layer: incremental indexing
//!
//! Owns the refresh planner, the chunker, the four per-artifact indexes, and
//! the supporting machinery (debouncing, cancellation, bracket matching,
//! metrics) the indexer orchestrator and completion orchestrator build on.
//! Depends only on `cortex-domain` for entities and port traits; concrete
//! storage backends live in `cortex-providers`.

/// Cooperative cancellation for in-flight refreshes.
pub mod abort;

/// Unmatched-bracket tracking for streamed completions.
pub mod bracket_match;

/// Smart-collapse chunker: turns file content into bounded-size chunks.
pub mod chunker;

/// Coalescing debouncer for completion triggers.
pub mod debounce;

/// Streaming autocomplete: snippet collection, prompt rendering, stream
/// filtering and the display/accept/reject lifecycle.
pub mod completion;

/// Per-artifact indexes (chunks, vector, full-text, snippets).
pub mod indexes;

/// Directory/file refresh orchestration across all configured indexes.
pub mod indexer;

/// Counters for indexing and completion activity.
pub mod metrics;

/// Incremental refresh planning against the durable catalog.
pub mod planner;

pub use abort::AbortRegistry;
pub use bracket_match::{BracketMatcher, BracketStack};
pub use chunker::{Chunker, SmartChunker};
pub use completion::{Completion, CompletionInput, CompletionOrchestrator, CompletionSettings};
pub use debounce::Debouncer;
pub use indexes::{ArtifactIndex, ChunkIndex, FtsIndex, ProgressStream, SnippetsIndex, VectorIndex};
pub use indexer::IndexerOrchestrator;
pub use metrics::{InProcessMetrics, Metrics};
pub use planner::{ReadFile, RefreshPlanner};
