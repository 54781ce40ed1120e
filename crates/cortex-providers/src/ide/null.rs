//! Null IDE collaborator
//!
//! Resolves nothing. Selected when no editor-side symbol resolution is wired
//! up; the root-path and import snippet sources then simply contribute no
//! snippets, the same way the indexer omits the vector artifact when
//! [`NullEmbeddingProvider`](crate::embedding::NullEmbeddingProvider) is in
//! play.

use async_trait::async_trait;
use cortex_domain::error::Result;
use cortex_domain::ports::{IdeContext, ResolvedRange};

/// Always resolves to an empty symbol set.
#[derive(Debug, Clone, Default)]
pub struct NullIdeContext;

impl NullIdeContext {
    /// Create a new null IDE collaborator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdeContext for NullIdeContext {
    async fn goto_definition(&self, _path: &str, _line: u32, _character: u32) -> Result<Vec<ResolvedRange>> {
        Ok(Vec::new())
    }

    async fn import_definitions(&self, _path: &str) -> Result<Vec<ResolvedRange>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_nothing() {
        let ide = NullIdeContext::new();
        assert!(ide.goto_definition("src/lib.rs", 0, 0).await.unwrap().is_empty());
        assert!(ide.import_definitions("src/lib.rs").await.unwrap().is_empty());
    }
}
