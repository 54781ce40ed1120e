//! Completion request/state entities

use serde::{Deserialize, Serialize};

/// A code-completion request as it arrives from the IDE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Unique id assigned by the caller; later requests for the same cursor
    /// session share nothing with it, each trigger gets a fresh id
    pub request_id: String,
    /// URI of the file being edited
    pub file_uri: String,
    /// Cursor offset (UTF-8 byte offset into the file contents) at trigger time
    pub cursor_offset: usize,
}

/// Lifecycle state of a single completion from trigger to resolution.
///
/// Each instance transitions at most once from `Pending` to `Displayed`, then
/// at most once from `Displayed` to either `Accepted` or `Rejected` (the
/// latter fired by a 10 s timer unless cancelled by a de-duplicating
/// follow-up completion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCompletion {
    /// Id of the request this completion answers
    pub request_id: String,
    /// URI of the file the completion targets
    pub file_uri: String,
    /// Cursor offset at trigger time
    pub cursor_offset: usize,
    /// SHA-256 hex digest of the text preceding the cursor at trigger time
    pub prefix_hash: String,
    /// SHA-256 hex digest of the text following the cursor at trigger time
    pub suffix_hash: String,
    /// Milliseconds-since-epoch this completion was shown to the user, if ever
    pub displayed_at_ms: Option<u64>,
    /// Final disposition, if resolved
    pub accepted: Option<bool>,
}

impl PendingCompletion {
    /// Build a freshly triggered, not-yet-displayed completion.
    pub fn new(
        request_id: impl Into<String>,
        file_uri: impl Into<String>,
        cursor_offset: usize,
        prefix_hash: impl Into<String>,
        suffix_hash: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            file_uri: file_uri.into(),
            cursor_offset,
            prefix_hash: prefix_hash.into(),
            suffix_hash: suffix_hash.into(),
            displayed_at_ms: None,
            accepted: None,
        }
    }

    /// True once the completion has been resolved (accepted or rejected).
    pub fn is_resolved(&self) -> bool {
        self.accepted.is_some()
    }

    /// True when `other` shares this completion's first displayed line,
    /// either as a prefix or suffix of it — the de-duplication condition from
    /// the display service's 500 ms window.
    pub fn represents_same_intention(&self, other_first_line: &str, self_first_line: &str) -> bool {
        self_first_line.starts_with(other_first_line) || other_first_line.starts_with(self_first_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_completion_is_unresolved() {
        let completion = PendingCompletion::new("r1", "file:///a.rs", 10, "pfx", "sfx");
        assert!(!completion.is_resolved());
        assert!(completion.displayed_at_ms.is_none());
    }

    #[test]
    fn prefix_relationship_detects_same_intention() {
        let completion = PendingCompletion::new("r1", "file:///a.rs", 10, "pfx", "sfx");
        assert!(completion.represents_same_intention("let x", "let x = 1;"));
        assert!(!completion.represents_same_intention("let y", "let x = 1;"));
    }
}
