//! Chunk entity and supported languages

use serde::{Deserialize, Serialize};

/// A unit of code extracted from a file by the chunker.
///
/// Every chunk MUST fit within its artifact's configured `max_chunk_size`,
/// measured in approximate model tokens; chunks that end up larger after
/// construction are discarded rather than split further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk's source text
    pub content: String,
    /// 0-based starting line, inclusive
    pub start_line: u32,
    /// 0-based ending line, inclusive
    pub end_line: u32,
    /// Path of the file this chunk was extracted from
    pub filepath: String,
    /// Content hash of the owning file version (the `cache_key`)
    pub digest: String,
    /// Position of this chunk within the file's chunk sequence
    pub index: usize,
}

impl Chunk {
    /// Number of lines this chunk spans (inclusive on both ends).
    pub fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Programming language identifier used to select a chunking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    /// Extension did not map to a supported language; chunked via line-accumulation only
    PlainText,
}

impl Language {
    /// Best-effort detection from a file extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            _ => Language::PlainText,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rust_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        assert_eq!(Language::from_extension("xyz"), Language::PlainText);
    }

    #[test]
    fn line_count_is_inclusive() {
        let chunk = Chunk {
            content: "a\nb".to_string(),
            start_line: 2,
            end_line: 3,
            filepath: "f.rs".to_string(),
            digest: "abc".to_string(),
            index: 0,
        };
        assert_eq!(chunk.line_count(), 2);
    }
}
