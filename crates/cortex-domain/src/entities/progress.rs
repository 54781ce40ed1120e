//! Progress reporting for long-running indexing operations

use serde::{Deserialize, Serialize};

/// Lifecycle status of an indexing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingStatus {
    Loading,
    Indexing,
    Paused,
    Cancelled,
    Done,
    Failed,
    Disabled,
}

/// A single update in the progress stream a directory/file refresh emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Overall completion fraction, in `[0, 1]`
    pub fraction: f32,
    /// Human-readable description of the current step
    pub description: String,
    /// Current lifecycle status
    pub status: IndexingStatus,
    /// Present only when `status == Failed`: the original error message
    pub error_message: Option<String>,
    /// Present only when `status == Failed`: whether the orchestrator
    /// believes the indexes are corrupt and should be cleared
    pub should_clear_indexes: Option<bool>,
}

impl ProgressUpdate {
    pub fn new(fraction: f32, description: impl Into<String>, status: IndexingStatus) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            description: description.into(),
            status,
            error_message: None,
            should_clear_indexes: None,
        }
    }

    pub fn cancelled() -> Self {
        Self::new(0.0, "cancelled", IndexingStatus::Cancelled)
    }

    pub fn paused(fraction: f32) -> Self {
        Self::new(fraction, "paused", IndexingStatus::Paused)
    }

    pub fn done() -> Self {
        Self::new(1.0, "done", IndexingStatus::Done)
    }

    pub fn failed(message: impl Into<String>, should_clear_indexes: bool) -> Self {
        Self {
            fraction: 0.0,
            description: "failed".to_string(),
            status: IndexingStatus::Failed,
            error_message: Some(message.into()),
            should_clear_indexes: Some(should_clear_indexes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_into_unit_range() {
        let update = ProgressUpdate::new(1.5, "x", IndexingStatus::Indexing);
        assert_eq!(update.fraction, 1.0);
    }

    #[test]
    fn failed_carries_clear_indexes_flag() {
        let update = ProgressUpdate::failed("disk full", true);
        assert_eq!(update.status, IndexingStatus::Failed);
        assert_eq!(update.should_clear_indexes, Some(true));
    }
}
