//! IDE Collaborator Port
//!
//! The completion orchestrator's optional window into live editor state
//! that it cannot derive from the request payload alone: symbol resolution
//! and the editor's notion of "nearby" code. The concrete bespoke IDE
//! transport is out of scope for this crate; callers that have no such
//! collaborator simply omit this port, and the symbol-resolution snippet
//! sources that depend on it collect nothing.

use crate::error::Result;
use async_trait::async_trait;

/// A resolved source range, already read, ready to surface as a snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRange {
    /// File the range was read from
    pub filepath: String,
    /// Text content of the range
    pub content: String,
}

/// Live editor state the completion orchestrator cannot infer on its own.
#[async_trait]
pub trait IdeContext: Send + Sync {
    /// Go-to-definition at a cursor position, AST-path style: resolves the
    /// symbol under the cursor to the range(s) defining it.
    async fn goto_definition(&self, path: &str, line: u32, character: u32) -> Result<Vec<ResolvedRange>>;

    /// Resolves the import statements visible from `path` to the ranges
    /// they point at, via the editor's cached import map.
    async fn import_definitions(&self, path: &str) -> Result<Vec<ResolvedRange>>;
}
