//! Prompt rendering for the completion orchestrator
//!
//! Turns a collected snippet pool plus the request's prefix/suffix into a
//! model-ready prompt string and the stop-token set that bounds it.

use handlebars::Handlebars;
use rand::seq::SliceRandom;
use serde_json::json;

use crate::chunker::approx_token_count;

use super::snippets::{Snippet, SnippetSourceKind};
use super::CompletionInput;

/// Characters of prefix/suffix kept around the cursor for dedup checks and
/// token-budget accounting; the rest of the prefix/suffix is sent in full.
const CARET_WINDOW_CHARS: usize = 200;

/// Fixed stop tokens applied regardless of configuration or model family.
const FIXED_STOP_TOKENS: &[&str] = &["/src/", "#- coding: utf-8", "``` "];

const DEFAULT_TEMPLATE: &str = "{{#if reponame}}// Repo: {{reponame}}\n{{/if}}// File: {{filename}} ({{language}})\n{{#each snippets}}// Context from {{this.filepath}}:\n{{this.content}}\n\n{{/each}}{{prefix}}";

/// A prompt ready to hand to a [`cortex_domain::ports::CompletionModel`].
pub struct RenderedPrompt {
    pub text: String,
    pub stop_tokens: Vec<String>,
}

fn caret_window(input: &CompletionInput) -> String {
    let prefix_tail = tail_chars(&input.prefix, CARET_WINDOW_CHARS);
    let suffix_head = head_chars(&input.suffix, CARET_WINDOW_CHARS);
    format!("{prefix_tail}{suffix_head}")
}

fn tail_chars(s: &str, n: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let start = chars.len().saturating_sub(n);
    chars[start..].iter().collect()
}

fn head_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Stop tokens for a given model identifier: the fixed set, anything
/// user-configured, and model-family-specific artifacts.
pub fn stop_tokens_for(model_id: &str, configured: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = FIXED_STOP_TOKENS.iter().map(|t| t.to_string()).collect();
    tokens.extend(configured.iter().cloned());
    if model_id.contains("codellama") {
        tokens.push("<EOT>".to_string());
    }
    if model_id.contains("starcoder") {
        tokens.push("<|endoftext|>".to_string());
    }
    tokens.sort();
    tokens.dedup();
    tokens
}

/// Order the snippet pool by priority, shuffling the `Base` group (imports
/// ∪ root-path) so repeated prompts for the same cursor vary.
fn ordered_snippets(mut snippets: Vec<Snippet>) -> Vec<Snippet> {
    let mut base: Vec<Snippet> = snippets.iter().filter(|s| s.source == SnippetSourceKind::Base).cloned().collect();
    base.shuffle(&mut rand::rng());
    snippets.retain(|s| s.source != SnippetSourceKind::Base);
    snippets.sort_by_key(|s| s.source.priority());
    snippets.extend(base);
    snippets
}

/// Drop snippets whose content is already visible in the caret window - the
/// model already sees them, repeating them just burns budget.
fn dedup_against_caret_window(snippets: Vec<Snippet>, window: &str) -> Vec<Snippet> {
    snippets.into_iter().filter(|s| !window.contains(s.content.trim())).collect()
}

/// Greedily fill `budget` tokens from the ordered, deduplicated pool.
fn fill_budget(snippets: Vec<Snippet>, budget: usize) -> Vec<Snippet> {
    let mut used = 0usize;
    let mut kept = Vec::new();
    for snippet in snippets {
        let cost = approx_token_count(&snippet.content);
        if used + cost > budget {
            continue;
        }
        used += cost;
        kept.push(snippet);
    }
    kept
}

/// Render the full prompt: select/order/dedup/budget snippets, then fill a
/// minimal Handlebars template.
pub fn render(input: &CompletionInput, snippets: Vec<Snippet>, max_prompt_tokens: usize, model_id: &str, configured_stop_tokens: &[String]) -> RenderedPrompt {
    let window = caret_window(input);
    let budget = max_prompt_tokens.saturating_sub(approx_token_count(&window)).saturating_sub(10);

    let ordered = ordered_snippets(snippets);
    let deduped = dedup_against_caret_window(ordered, &window);
    let budgeted = fill_budget(deduped, budget);

    let mut registry = Handlebars::new();
    registry.set_strict_mode(false);
    let snippet_payload: Vec<serde_json::Value> = budgeted
        .iter()
        .map(|s| json!({"filepath": s.filepath, "content": s.content}))
        .collect();
    let data = json!({
        "prefix": input.prefix,
        "suffix": input.suffix,
        "filename": input.filepath,
        "reponame": input.reponame,
        "language": format!("{:?}", input.language).to_lowercase(),
        "snippets": snippet_payload,
    });
    let text = registry.render_template(DEFAULT_TEMPLATE, &data).unwrap_or_else(|_| input.prefix.clone());

    RenderedPrompt { text, stop_tokens: stop_tokens_for(model_id, configured_stop_tokens) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_domain::entities::Language;

    fn input() -> CompletionInput {
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
        }
    }

    #[test]
    fn render_includes_prefix() {
        let rendered = render(&input(), vec![], 100, "null", &[]);
        assert!(rendered.text.contains("fn main()"));
    }

    #[test]
    fn dedup_drops_snippet_already_in_caret_window() {
        let snippets = vec![Snippet { source: SnippetSourceKind::Base, filepath: "a.rs".into(), content: "fn main()".into() }];
        let window = caret_window(&input());
        let kept = dedup_against_caret_window(snippets, &window);
        assert!(kept.is_empty());
    }

    #[test]
    fn fill_budget_stops_at_limit() {
        let snippets = vec![
            Snippet { source: SnippetSourceKind::Base, filepath: "a.rs".into(), content: "one two three".into() },
            Snippet { source: SnippetSourceKind::Base, filepath: "b.rs".into(), content: "four five six".into() },
        ];
        let kept = fill_budget(snippets, 3);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn stop_tokens_include_fixed_set() {
        let tokens = stop_tokens_for("null", &[]);
        assert!(tokens.iter().any(|t| t == "/src/"));
    }
}
