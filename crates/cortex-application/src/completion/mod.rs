//! Completion orchestrator
//!
//! Turns a trigger (cursor position, prefix/suffix, editor-supplied context)
//! into a displayable completion: debounce, collect snippets from every
//! configured source under a hard timeout, render a prompt, stream the model,
//! filter the stream, and track the result through to accept/reject.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;
use moka::sync::Cache;
use sha2::{Digest, Sha256};

use cortex_domain::entities::{Language, PendingCompletion};
use cortex_domain::ports::CompletionModel;

use crate::bracket_match::BracketMatcher;
use crate::debounce::Debouncer;
use crate::metrics::Metrics;

pub mod filter;
pub mod pending;
pub mod prompt;
pub mod snippets;

pub use filter::{should_soft_timeout, CharacterStage, LineStage};
pub use pending::PendingRegistry;
pub use prompt::{stop_tokens_for, RenderedPrompt};
pub use snippets::{Snippet, SnippetSource, SnippetSourceKind};

/// How long the line stage waits before returning whatever prefix of the
/// completion has been assembled so far, once at least one non-blank line
/// has been produced.
const SHOW_WHATEVER_WE_HAVE_MS: u64 = 250;

/// Everything the orchestrator needs to know about a single trigger.
#[derive(Debug, Clone)]
pub struct CompletionInput {
    pub request_id: String,
    pub filepath: String,
    pub prefix: String,
    pub suffix: String,
    /// (line, character), both 0-based
    pub position: (u32, u32),
    pub language: Language,
    pub recently_edited_ranges: Vec<String>,
    pub recently_visited_ranges: Vec<String>,
    pub diff_ranges: Vec<String>,
    pub ide_snippets: Vec<String>,
    pub clipboard: Vec<String>,
    /// Overrides the caret-window prefix used for rendering, when the
    /// caller has already computed one (e.g. a manual "trigger completion"
    /// command at a position other than the live cursor).
    pub manually_pass_prefix: Option<String>,
    /// True when the editor already has its own suggestion widget open -
    /// offering a second one at the same time is a poor experience.
    pub selected_completion_info_present: bool,
    pub reponame: Option<String>,
}

/// A completion ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub request_id: String,
    pub text: String,
    pub is_multiline: bool,
}

/// Tunables the server layer derives from configuration and hands to the
/// orchestrator at construction time. Declared here rather than imported
/// from `cortex-infrastructure`'s `CompletionConfig`, since that crate
/// depends on this one and not the other way around.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub debounce_delay_ms: u64,
    pub snippet_collection_timeout_ms: u64,
    pub rejection_timeout_secs: u64,
    pub dedup_window_ms: u64,
    pub prompt_token_budget: usize,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            debounce_delay_ms: 75,
            snippet_collection_timeout_ms: 100,
            rejection_timeout_secs: 10,
            dedup_window_ms: 500,
            prompt_token_budget: 2048,
        }
    }
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn comment_prefix_for(language: Language) -> Option<String> {
    let prefix = match language {
        Language::Python | Language::Ruby => "#",
        Language::PlainText => return None,
        _ => "//",
    };
    Some(prefix.to_string())
}

fn first_nonblank_line(suffix: &str) -> Option<String> {
    suffix.lines().find(|l| !l.trim().is_empty()).map(|l| l.trim().to_string())
}

fn tail_chars(s: &str, n: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let start = chars.len().saturating_sub(n);
    chars[start..].iter().collect()
}

fn head_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// True when the cursor sits where a model naturally keeps generating past
/// the current line - after an opener with nothing but closers ahead.
fn should_multiline(input: &CompletionInput) -> bool {
    let last_prefix_char = input.prefix.trim_end().chars().last();
    let opens_block = matches!(last_prefix_char, Some('{') | Some('(') | Some('[') | Some(':'));
    let suffix_head = input.suffix.trim_start();
    opens_block && (suffix_head.is_empty() || suffix_head.starts_with(['}', ')', ']']))
}

/// Coordinates snippet collection, prompt rendering, model streaming and the
/// display/accept/reject lifecycle for a single trigger at a time.
pub struct CompletionOrchestrator {
    model: Arc<dyn CompletionModel>,
    sources: Vec<Arc<dyn SnippetSource>>,
    debouncer: Debouncer,
    brackets: Arc<BracketMatcher>,
    pending: Arc<PendingRegistry>,
    /// Caches a fully-assembled completion by request intent so an
    /// overlapping trigger (the same cursor context, re-requested before the
    /// first stream finished) replays it instead of starting a new one.
    recent: Cache<String, String>,
    /// Displayed-but-unresolved completion text, keyed by request id, so
    /// `accept` can feed the bracket matcher without re-running the model.
    awaiting_resolution: Cache<String, (String, String)>,
    settings: CompletionSettings,
}

impl CompletionOrchestrator {
    pub fn new(model: Arc<dyn CompletionModel>, sources: Vec<Arc<dyn SnippetSource>>, metrics: Arc<dyn Metrics>, settings: CompletionSettings) -> Self {
        let pending = Arc::new(PendingRegistry::new(
            Duration::from_secs(settings.rejection_timeout_secs),
            Duration::from_millis(settings.dedup_window_ms),
            metrics,
        ));
        let recent = Cache::builder().max_capacity(50).time_to_live(Duration::from_secs(30)).build();
        let awaiting_resolution = Cache::builder().max_capacity(200).time_to_live(Duration::from_secs(60)).build();
        Self {
            model,
            sources,
            debouncer: Debouncer::new(),
            brackets: Arc::new(BracketMatcher::new()),
            pending,
            recent,
            awaiting_resolution,
            settings,
        }
    }

    /// Run the full pipeline for `input`, or `None` if the trigger was
    /// prefiltered, debounced away, or produced nothing worth showing.
    pub async fn provide(&self, input: CompletionInput) -> Option<Completion> {
        if input.selected_completion_info_present {
            return None;
        }
        if input.prefix.trim().is_empty() && input.suffix.trim().is_empty() {
            return None;
        }

        if self.debouncer.delay(self.settings.debounce_delay_ms).await {
            return None;
        }

        let multiline = should_multiline(&input);
        let cache_key = self.intent_key(&input);

        let text = match self.recent.get(&cache_key) {
            Some(cached) => cached,
            None => {
                let snippets = self.collect_snippets(&input).await;
                let rendered = prompt::render(&input, snippets, self.settings.prompt_token_budget, self.model.model_id(), &[]);
                let assembled = self.stream_and_filter(&rendered, &input, multiline).await?;
                if !assembled.trim().is_empty() {
                    self.recent.insert(cache_key, assembled.clone());
                }
                assembled
            }
        };

        if text.trim().is_empty() {
            return None;
        }

        let first_line = text.lines().next().unwrap_or_default().to_string();
        let completion = PendingCompletion::new(
            input.request_id.clone(),
            input.filepath.clone(),
            (input.position.1) as usize,
            sha256_hex(&input.prefix),
            sha256_hex(&input.suffix),
        );
        self.awaiting_resolution.insert(input.request_id.clone(), (input.filepath.clone(), text.clone()));
        Arc::clone(&self.pending).register_displayed(completion, first_line);

        Some(Completion { request_id: input.request_id, text, is_multiline: multiline })
    }

    /// Mark `request_id` accepted: cancels its rejection timer, credits the
    /// metric and remembers any brackets it left unmatched for the next
    /// stream in that file.
    pub fn accept(&self, request_id: &str) {
        self.pending.accept(request_id);
        if let Some((file_uri, text)) = self.awaiting_resolution.get(request_id) {
            self.brackets.record_accepted(&file_uri, &text);
        }
    }

    fn intent_key(&self, input: &CompletionInput) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.filepath.as_bytes());
        hasher.update(b"\0");
        hasher.update(input.prefix.as_bytes());
        hasher.update(b"\0");
        hasher.update(input.suffix.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.model.model_id().as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn collect_snippets(&self, input: &CompletionInput) -> Vec<Snippet> {
        let timeout = Duration::from_millis(self.settings.snippet_collection_timeout_ms);
        let collected = futures::future::join_all(self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move { tokio::time::timeout(timeout, source.collect(input)).await.unwrap_or_default() }
        }))
        .await;
        collected.into_iter().flatten().collect()
    }

    async fn stream_and_filter(&self, rendered: &RenderedPrompt, input: &CompletionInput, multiline: bool) -> Option<String> {
        let mut stream = self.model.stream(&rendered.text, &rendered.stop_tokens).await.ok()?;

        let bracket = if multiline {
            Some(self.brackets.seed_multiline(&input.filepath))
        } else {
            Some(self.brackets.seed_single_line(&tail_chars(&input.prefix, 50), &head_chars(&input.suffix, 50)))
        };
        let mut char_stage = CharacterStage::new(rendered.stop_tokens.clone(), &input.suffix, bracket);

        let started = Instant::now();
        let soft_timeout = Duration::from_millis(SHOW_WHATEVER_WE_HAVE_MS);
        let mut raw = String::new();
        let mut stopped = false;

        while let Some(chunk) = stream.next().await {
            let Ok(chunk) = chunk else { break };
            for ch in chunk.chars() {
                let (flush, stop) = char_stage.push(ch);
                raw.push_str(&flush);
                if stop {
                    stopped = true;
                    break;
                }
            }
            if stopped || should_soft_timeout(started, soft_timeout, !raw.trim().is_empty()) {
                break;
            }
        }
        if !stopped {
            raw.push_str(&char_stage.finish());
        }

        let below_cursor_line = if multiline { None } else { first_nonblank_line(&input.suffix) };
        let mut line_stage = LineStage::new(below_cursor_line, comment_prefix_for(input.language));
        let mut kept_lines = Vec::new();
        for line in raw.split('\n') {
            if line_stage.is_stopped() {
                break;
            }
            if let Some(kept) = line_stage.push(line) {
                kept_lines.push(kept);
                if !multiline {
                    break;
                }
            }
        }
        Some(kept_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_providers::completion_model::NullCompletionModel;
    use std::sync::Arc;

    fn base_input() -> CompletionInput {
        CompletionInput {
            request_id: "r1".into(),
            filepath: "src/lib.rs".into(),
            prefix: "fn main() {\n    ".into(),
            suffix: "\n}".into(),
            position: (1, 4),
            language: Language::Rust,
            recently_edited_ranges: vec![],
            recently_visited_ranges: vec![],
            diff_ranges: vec![],
            ide_snippets: vec![],
            clipboard: vec![],
            manually_pass_prefix: None,
            selected_completion_info_present: false,
            reponame: None,
        }
    }

    #[tokio::test]
    async fn provide_returns_none_when_selection_widget_open() {
        let orchestrator = CompletionOrchestrator::new(
            Arc::new(NullCompletionModel::new()),
            vec![],
            Arc::new(crate::metrics::InProcessMetrics::new()),
            CompletionSettings::default(),
        );
        let mut input = base_input();
        input.selected_completion_info_present = true;
        assert!(orchestrator.provide(input).await.is_none());
    }

    #[tokio::test]
    async fn provide_returns_none_for_empty_model_stream() {
        let orchestrator = CompletionOrchestrator::new(
            Arc::new(NullCompletionModel::new()),
            vec![],
            Arc::new(crate::metrics::InProcessMetrics::new()),
            CompletionSettings { debounce_delay_ms: 0, ..CompletionSettings::default() },
        );
        assert!(orchestrator.provide(base_input()).await.is_none());
    }

    #[test]
    fn should_multiline_true_after_opening_brace_with_nothing_ahead() {
        let mut input = base_input();
        input.prefix = "fn main() {".into();
        input.suffix = String::new();
        assert!(should_multiline(&input));
    }

    #[test]
    fn should_multiline_false_mid_expression() {
        let mut input = base_input();
        input.prefix = "let x = ".into();
        input.suffix = ";".into();
        assert!(!should_multiline(&input));
    }

    #[test]
    fn comment_prefix_matches_language_family() {
        assert_eq!(comment_prefix_for(Language::Python).as_deref(), Some("#"));
        assert_eq!(comment_prefix_for(Language::Rust).as_deref(), Some("//"));
    }
}
