//! Smart-collapse chunker
//!
//! Two modes selected by file extension: an AST-driven "smart collapse" mode
//! for languages with a registered tree-sitter grammar, and a plain
//! line-accumulation fallback for everything else.

use cortex_domain::entities::{Chunk, Language};
use unicode_segmentation::UnicodeSegmentation;

/// Reserved token headroom subtracted before starting a new basic-mode chunk.
pub const BASIC_CHUNK_TOKEN_HEADROOM: usize = 5;

/// Approximate, tokenizer-agnostic token count: splits on Unicode word
/// boundaries and counts non-whitespace segments. Calibrated to roughly
/// track BPE token density without depending on any specific model's vocab.
pub fn approx_token_count(text: &str) -> usize {
    text.split_word_bounds().filter(|w| !w.trim().is_empty()).count()
}

/// Extracts [`Chunk`]s from a file's content.
pub trait Chunker: Send + Sync {
    /// Chunk `content` from `filepath`, tagging every chunk with `digest`
    /// (the owning file version's cache key) and bounding chunk size to
    /// `max_chunk_size` approximate tokens.
    fn chunk(&self, content: &str, filepath: &str, digest: &str, max_chunk_size: usize) -> Vec<Chunk>;
}

/// Default chunker: AST smart-collapse where a grammar is registered, plain
/// line accumulation otherwise.
#[derive(Default)]
pub struct SmartChunker;

impl SmartChunker {
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for SmartChunker {
    fn chunk(&self, content: &str, filepath: &str, digest: &str, max_chunk_size: usize) -> Vec<Chunk> {
        if content.is_empty() || content.len() > 1_000_000 {
            return Vec::new();
        }
        let base_name = std::path::Path::new(filepath)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if !base_name.contains('.') {
            return Vec::new();
        }

        let ext = std::path::Path::new(filepath)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let language = Language::from_extension(ext);

        let chunks = match ast_grammar_for(language) {
            Some(grammar) => ast::collapse_chunk(content, filepath, digest, max_chunk_size, grammar)
                .unwrap_or_else(|| basic::chunk(content, filepath, digest, max_chunk_size)),
            None => basic::chunk(content, filepath, digest, max_chunk_size),
        };

        chunks
            .into_iter()
            .enumerate()
            .map(|(index, mut c)| {
                c.index = index;
                c
            })
            .filter(|c| approx_token_count(&c.content) <= max_chunk_size)
            .collect()
    }
}

/// A registered tree-sitter grammar plus the node-type tables the
/// smart-collapse algorithm needs for that language.
struct AstGrammar {
    language: tree_sitter::Language,
    /// Node kinds treated as a standalone function/method definition.
    function_kinds: &'static [&'static str],
    /// Node kinds treated as a class/impl/struct container that may nest
    /// functions directly.
    container_kinds: &'static [&'static str],
    /// Placeholder used for a collapsed function body.
    placeholder: &'static str,
}

fn ast_grammar_for(language: Language) -> Option<AstGrammar> {
    match language {
        Language::Rust => Some(AstGrammar {
            language: tree_sitter_rust::LANGUAGE.into(),
            function_kinds: &["function_item"],
            container_kinds: &["impl_item", "trait_item", "struct_item", "mod_item"],
            placeholder: "{ ... }",
        }),
        Language::Python => Some(AstGrammar {
            language: tree_sitter_python::LANGUAGE.into(),
            function_kinds: &["function_definition"],
            container_kinds: &["class_definition"],
            placeholder: "...",
        }),
        Language::JavaScript => Some(AstGrammar {
            language: tree_sitter_javascript::LANGUAGE.into(),
            function_kinds: &["function_declaration", "method_definition"],
            container_kinds: &["class_declaration"],
            placeholder: "{ ... }",
        }),
        Language::TypeScript => Some(AstGrammar {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            function_kinds: &["function_declaration", "method_definition"],
            container_kinds: &["class_declaration", "interface_declaration"],
            placeholder: "{ ... }",
        }),
        Language::Go => Some(AstGrammar {
            language: tree_sitter_go::LANGUAGE.into(),
            function_kinds: &["function_declaration", "method_declaration"],
            container_kinds: &["type_declaration"],
            placeholder: "{ ... }",
        }),
        _ => None,
    }
}

mod ast {
    use super::*;
    use tree_sitter::{Node, Parser};

    pub fn collapse_chunk(
        content: &str,
        filepath: &str,
        digest: &str,
        max_chunk_size: usize,
        grammar: AstGrammar,
    ) -> Option<Vec<Chunk>> {
        let mut parser = Parser::new();
        parser.set_language(&grammar.language).ok()?;
        let tree = parser.parse(content, None)?;
        let root = tree.root_node();

        let mut chunks = Vec::new();
        collect(root, content, filepath, digest, max_chunk_size, &grammar, None, &mut chunks);
        Some(chunks)
    }

    fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
        node.utf8_text(source.as_bytes()).unwrap_or("")
    }

    fn line_range(node: Node) -> (u32, u32) {
        (node.start_position().row as u32, node.end_position().row as u32)
    }

    fn signature_line(node: Node, source: &str) -> String {
        node_text(node, source).lines().next().unwrap_or("").to_string()
    }

    /// Recursively emit a chunk for `node` (if it's a function or container)
    /// and recurse into every child, so collapsed forms and their
    /// descendants all appear somewhere in the chunk stream.
    #[allow(clippy::too_many_arguments)]
    fn collect(
        node: Node,
        source: &str,
        filepath: &str,
        digest: &str,
        max_chunk_size: usize,
        grammar: &AstGrammar,
        parent_header: Option<&str>,
        out: &mut Vec<Chunk>,
    ) {
        let kind = node.kind();
        let whole_text = node_text(node, source);
        let (start_line, end_line) = line_range(node);

        if node.parent().is_none() && approx_token_count(whole_text) <= max_chunk_size {
            out.push(make_chunk(whole_text.to_string(), start_line, end_line, filepath, digest));
        } else if grammar.function_kinds.contains(&kind) {
            let sig = signature_line(node, source);
            let mut text = if let Some(header) = parent_header {
                format!("{header}\n...\n{sig}\n{}", grammar.placeholder)
            } else {
                format!("{sig}\n{}", grammar.placeholder)
            };
            if approx_token_count(&text) > max_chunk_size {
                text = sig;
            }
            out.push(make_chunk(text, start_line, end_line, filepath, digest));
        } else if grammar.container_kinds.contains(&kind) {
            let header = whole_text.lines().next().unwrap_or("").to_string();
            let mut placeholders = Vec::new();
            let mut cursor = 0;

            let mut child_cursor = node.walk();
            for child in node.children(&mut child_cursor) {
                if grammar.function_kinds.contains(&child.kind()) {
                    let rel_start = (child.start_byte() - node.start_byte()).min(whole_text.len());
                    let rel_end = (child.end_byte() - node.start_byte()).min(whole_text.len());
                    let before = whole_text.get(cursor..rel_start).unwrap_or("");
                    let sig = signature_line(child, source);
                    placeholders.push((before.to_string(), format!("{sig}\n{}", grammar.placeholder)));
                    cursor = rel_end;
                }
            }
            let tail = whole_text.get(cursor..).unwrap_or("").to_string();

            let mut body = String::new();
            for (before, placeholder) in &placeholders {
                body.push_str(before);
                body.push_str(placeholder);
            }
            body.push_str(&tail);

            let mut full = format!("{header}\n{body}");
            // Progressively drop placeholders from the end until it fits.
            let mut n_kept = placeholders.len();
            while approx_token_count(&full) > max_chunk_size && n_kept > 0 {
                n_kept -= 1;
                let mut rebuilt = String::new();
                for (before, placeholder) in placeholders.iter().take(n_kept) {
                    rebuilt.push_str(before);
                    rebuilt.push_str(placeholder);
                }
                rebuilt.push_str(&tail);
                full = collapse_blank_runs(&format!("{header}\n{rebuilt}"));
            }
            out.push(make_chunk(full, start_line, end_line, filepath, digest));
        }

        let next_parent_header = if grammar.container_kinds.contains(&kind) {
            Some(whole_text.lines().next().unwrap_or("").to_string())
        } else {
            parent_header.map(str::to_string)
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            collect(
                child,
                source,
                filepath,
                digest,
                max_chunk_size,
                grammar,
                next_parent_header.as_deref(),
                out,
            );
        }
    }

    fn collapse_blank_runs(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut blank_run = 0;
        for line in text.lines() {
            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn make_chunk(content: String, start_line: u32, end_line: u32, filepath: &str, digest: &str) -> Chunk {
        Chunk {
            content,
            start_line,
            end_line,
            filepath: filepath.to_string(),
            digest: digest.to_string(),
            index: 0,
        }
    }
}

mod basic {
    use super::*;

    /// Accumulate lines; flush and start fresh whenever adding the next line
    /// would exceed `max_chunk_size - BASIC_CHUNK_TOKEN_HEADROOM` tokens.
    /// Lines individually exceeding the limit are dropped, not split.
    pub fn chunk(content: &str, filepath: &str, digest: &str, max_chunk_size: usize) -> Vec<Chunk> {
        let budget = max_chunk_size.saturating_sub(BASIC_CHUNK_TOKEN_HEADROOM);
        let mut chunks = Vec::new();
        let mut buf: Vec<&str> = Vec::new();
        let mut buf_tokens = 0usize;
        let mut start_line = 0u32;

        for (line_no, line) in content.lines().enumerate() {
            let line_tokens = approx_token_count(line);
            if line_tokens > budget {
                continue;
            }
            if !buf.is_empty() && buf_tokens + line_tokens > budget {
                chunks.push(flush(&buf, start_line, line_no as u32 - 1, filepath, digest));
                buf.clear();
                buf_tokens = 0;
                start_line = line_no as u32;
            }
            if buf.is_empty() {
                start_line = line_no as u32;
            }
            buf.push(line);
            buf_tokens += line_tokens;
        }
        if !buf.is_empty() {
            let end_line = start_line + buf.len() as u32 - 1;
            chunks.push(flush(&buf, start_line, end_line, filepath, digest));
        }
        chunks
    }

    fn flush(lines: &[&str], start_line: u32, end_line: u32, filepath: &str, digest: &str) -> Chunk {
        Chunk {
            content: lines.join("\n"),
            start_line,
            end_line,
            filepath: filepath.to_string(),
            digest: digest.to_string(),
            index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_no_chunks() {
        let chunker = SmartChunker::new();
        assert!(chunker.chunk("", "a.rs", "digest", 512).is_empty());
    }

    #[test]
    fn extensionless_basename_is_skipped() {
        let chunker = SmartChunker::new();
        assert!(chunker.chunk("fn main() {}", "Makefile", "digest", 512).is_empty());
    }

    #[test]
    fn rust_function_is_collapsed_with_placeholder() {
        let chunker = SmartChunker::new();
        let source = "fn one() {\n    let x = 1;\n    x\n}\n\nfn two() {\n    let y = 2;\n    y\n}\n";
        let chunks = chunker.chunk(source, "a.rs", "digest", 8);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().any(|c| c.content.contains("{ ... }")));
    }

    #[test]
    fn every_chunk_fits_within_max_size() {
        let chunker = SmartChunker::new();
        let source = (0..200).map(|i| format!("let v{i} = {i};")).collect::<Vec<_>>().join("\n");
        let chunks = chunker.chunk(&source, "a.txt", "digest", 32);
        for c in &chunks {
            assert!(approx_token_count(&c.content) <= 32);
            assert!(c.start_line <= c.end_line);
        }
    }

    #[test]
    fn basic_mode_drops_oversized_single_line() {
        let huge_line = "x ".repeat(100);
        let chunks = basic::chunk(&huge_line, "a.txt", "digest", 10);
        assert!(chunks.is_empty());
    }
}
