//! Snippet collection for completion prompts
//!
//! Gathers candidate context in parallel from several sources, each raced
//! against a hard per-source timeout by the orchestrator (this module only
//! defines what to collect, not the timeout itself).

use cortex_domain::ports::IdeContext;
use moka::sync::Cache;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::CompletionInput;

/// Where a collected snippet came from; also its slot in the priority table
/// used when filling the prompt's token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetSourceKind {
    Clipboard,
    RecentlyVisited,
    RecentlyEdited,
    Diff,
    /// `imports ∪ root-path`, shuffled together as a single low-priority pool
    Base,
    Ide,
}

impl SnippetSourceKind {
    /// Lower sorts first: highest priority for inclusion under the token budget.
    pub fn priority(self) -> u8 {
        match self {
            SnippetSourceKind::Clipboard => 0,
            SnippetSourceKind::RecentlyVisited => 1,
            SnippetSourceKind::RecentlyEdited => 2,
            SnippetSourceKind::Diff => 3,
            SnippetSourceKind::Base => 4,
            SnippetSourceKind::Ide => 5,
        }
    }
}

/// A single piece of candidate context for the rendered prompt.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub source: SnippetSourceKind,
    pub filepath: String,
    pub content: String,
}

/// One source of candidate snippets.
#[async_trait::async_trait]
pub trait SnippetSource: Send + Sync {
    fn kind(&self) -> SnippetSourceKind;
    async fn collect(&self, input: &CompletionInput) -> Vec<Snippet>;
}

fn cache_key(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"\0");
    }
    hex::encode(hasher.finalize())
}

/// Text the request already carries verbatim: clipboard contents, recently
/// visited ranges, recently edited ranges, VCS diff hunks, and anything an
/// IDE chose to attach directly. No network or port call is needed.
pub struct InlineSnippetSource {
    kind: SnippetSourceKind,
}

impl InlineSnippetSource {
    pub fn clipboard() -> Self {
        Self { kind: SnippetSourceKind::Clipboard }
    }
    pub fn recently_visited() -> Self {
        Self { kind: SnippetSourceKind::RecentlyVisited }
    }
    pub fn recently_edited() -> Self {
        Self { kind: SnippetSourceKind::RecentlyEdited }
    }
    pub fn diff() -> Self {
        Self { kind: SnippetSourceKind::Diff }
    }
    pub fn ide() -> Self {
        Self { kind: SnippetSourceKind::Ide }
    }

    fn texts<'a>(&self, input: &'a CompletionInput) -> &'a [String] {
        match self.kind {
            SnippetSourceKind::Clipboard => &input.clipboard,
            SnippetSourceKind::RecentlyVisited => &input.recently_visited_ranges,
            SnippetSourceKind::RecentlyEdited => &input.recently_edited_ranges,
            SnippetSourceKind::Diff => &input.diff_ranges,
            SnippetSourceKind::Ide => &input.ide_snippets,
            SnippetSourceKind::Base => &[],
        }
    }
}

#[async_trait::async_trait]
impl SnippetSource for InlineSnippetSource {
    fn kind(&self) -> SnippetSourceKind {
        self.kind
    }

    async fn collect(&self, input: &CompletionInput) -> Vec<Snippet> {
        self.texts(input)
            .iter()
            .filter(|text| !text.trim().is_empty())
            .map(|text| Snippet { source: self.kind, filepath: input.filepath.clone(), content: text.clone() })
            .collect()
    }
}

/// Root-path snippets: resolves the AST path around the cursor to its
/// definition site via go-to-definition, cached in an LRU keyed by a
/// SHA-256 chain of the file path and cursor position.
pub struct RootPathSnippetSource {
    ide: Arc<dyn IdeContext>,
    cache: Cache<String, Vec<Snippet>>,
}

impl RootPathSnippetSource {
    pub fn new(ide: Arc<dyn IdeContext>) -> Self {
        Self { ide, cache: Cache::new(100) }
    }
}

#[async_trait::async_trait]
impl SnippetSource for RootPathSnippetSource {
    fn kind(&self) -> SnippetSourceKind {
        SnippetSourceKind::Base
    }

    async fn collect(&self, input: &CompletionInput) -> Vec<Snippet> {
        let key = cache_key(&[&input.filepath, &input.position.0.to_string(), &input.position.1.to_string()]);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }
        let ranges = self
            .ide
            .goto_definition(&input.filepath, input.position.0, input.position.1)
            .await
            .unwrap_or_default();
        let snippets: Vec<Snippet> = ranges
            .into_iter()
            .map(|r| Snippet { source: SnippetSourceKind::Base, filepath: r.filepath, content: r.content })
            .collect();
        self.cache.insert(key, snippets.clone());
        snippets
    }
}

/// Import-definition snippets: resolves symbols near the cursor through the
/// editor's cached import map.
pub struct ImportSnippetSource {
    ide: Arc<dyn IdeContext>,
    cache: Cache<String, Vec<Snippet>>,
}

impl ImportSnippetSource {
    pub fn new(ide: Arc<dyn IdeContext>) -> Self {
        Self { ide, cache: Cache::new(100) }
    }
}

#[async_trait::async_trait]
impl SnippetSource for ImportSnippetSource {
    fn kind(&self) -> SnippetSourceKind {
        SnippetSourceKind::Base
    }

    async fn collect(&self, input: &CompletionInput) -> Vec<Snippet> {
        let key = cache_key(&[&input.filepath]);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }
        let ranges = self.ide.import_definitions(&input.filepath).await.unwrap_or_default();
        let snippets: Vec<Snippet> = ranges
            .into_iter()
            .map(|r| Snippet { source: SnippetSourceKind::Base, filepath: r.filepath, content: r.content })
            .collect();
        self.cache.insert(key, snippets.clone());
        snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionInput;

    fn input_with(clipboard: Vec<String>) -> CompletionInput {
        CompletionInput {
            request_id: "r1".into(),
            filepath: "src/lib.rs".into(),
            prefix: "fn main() {".into(),
            suffix: "}".into(),
            position: (0, 10),
            language: cortex_domain::entities::Language::Rust,
            recently_edited_ranges: vec![],
            recently_visited_ranges: vec![],
            diff_ranges: vec![],
            ide_snippets: vec![],
            clipboard,
            manually_pass_prefix: None,
            selected_completion_info_present: false,
            reponame: None,
        }
    }

    #[tokio::test]
    async fn inline_source_skips_blank_entries() {
        let source = InlineSnippetSource::clipboard();
        let input = input_with(vec!["  ".into(), "let x = 1;".into()]);
        let snippets = source.collect(&input).await;
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].content, "let x = 1;");
    }

    #[test]
    fn priority_orders_clipboard_before_base() {
        assert!(SnippetSourceKind::Clipboard.priority() < SnippetSourceKind::Base.priority());
    }
}
