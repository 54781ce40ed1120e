//! Per-artifact indexes
//!
//! Each index consumes the [`RefreshPlan`] produced for its artifact and
//! drives the corresponding storage to match it, completing items in the
//! documented order: `compute`, then `add_tag`, then `remove_tag`, then
//! `del`. Progress is reported as a stream proportional to position within
//! the plan's total mutation count.
//!
//! The synthetic `GlobalCache` artifact has no module here: per its own
//! description it is "driven by the complete callback, not by the
//! orchestrator", so its behavior lives entirely inside
//! [`crate::planner::RefreshPlanner::complete`].

pub mod chunk_index;
pub mod fts_index;
pub mod snippets_index;
pub mod vector_index;

pub use chunk_index::ChunkIndex;
pub use fts_index::FtsIndex;
pub use snippets_index::SnippetsIndex;
pub use vector_index::VectorIndex;

use cortex_domain::entities::{ArtifactId, ProgressUpdate, RefreshPlan, Tag};
use futures::Stream;
use std::pin::Pin;

/// A stream of progress updates for one artifact's refresh.
pub type ProgressStream = Pin<Box<dyn Stream<Item = ProgressUpdate> + Send>>;

/// Common shape every per-artifact index exposes to the orchestrator.
#[async_trait::async_trait]
pub trait ArtifactIndex: Send + Sync {
    fn artifact_id(&self) -> ArtifactId;

    /// Drive this artifact's storage to match `plan` for `tag`, streaming
    /// progress. `read_file` supplies file bytes for items needing content
    /// (chunking, embedding); items that only need a catalog link (`add_tag`,
    /// `remove_tag`) never call it.
    ///
    /// Takes `self` behind an `Arc` (rather than `&self`) so the returned
    /// `'static` stream can hold its own handle to the index across await
    /// points without borrowing.
    async fn update(
        self: std::sync::Arc<Self>,
        tag: Tag,
        plan: RefreshPlan,
        planner: std::sync::Arc<crate::planner::RefreshPlanner>,
        read_file: crate::planner::ReadFile,
    ) -> ProgressStream;
}

pub(crate) fn progress(done: usize, total: usize, description: impl Into<String>) -> ProgressUpdate {
    let fraction = if total == 0 { 1.0 } else { done as f32 / total as f32 };
    ProgressUpdate::new(fraction, description, cortex_domain::entities::IndexingStatus::Indexing)
}
