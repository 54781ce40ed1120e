//! Bracket-matching service
//!
//! Tracks unmatched opening brackets left behind by the last *accepted*
//! completion in a given file, and uses them to seed the bracket stack for
//! the next stream in that file. A closer with nothing left to match ends
//! the stream at the offending character - it almost always means the model
//! echoed a closer that belongs to code already present after the cursor.

use std::collections::HashMap;
use std::sync::Mutex;

const OPENERS: [char; 3] = ['(', '[', '{'];
const CLOSERS: [char; 3] = [')', ']', '}'];

fn matches(opener: char, closer: char) -> bool {
    matches!((opener, closer), ('(', ')') | ('[', ']') | ('{', '}'))
}

/// Per-file memory of opening brackets an accepted completion left unmatched.
#[derive(Default)]
pub struct BracketMatcher {
    unmatched_by_file: Mutex<HashMap<String, Vec<char>>>,
}

/// Tracks an in-progress bracket stack for a single stream.
pub struct BracketStack {
    stack: Vec<char>,
    seen_non_whitespace: bool,
}

impl BracketMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan an accepted completion as a bracket stack and remember any
    /// openers left unmatched, keyed by `file_uri`.
    pub fn record_accepted(&self, file_uri: &str, completion: &str) {
        let mut stack = Vec::new();
        for ch in completion.chars() {
            if OPENERS.contains(&ch) {
                stack.push(ch);
            } else if CLOSERS.contains(&ch) {
                if let Some(&top) = stack.last() {
                    if matches(top, ch) {
                        stack.pop();
                    }
                }
            }
        }
        let mut by_file = self.unmatched_by_file.lock().unwrap();
        if stack.is_empty() {
            by_file.remove(file_uri);
        } else {
            by_file.insert(file_uri.to_string(), stack);
        }
    }

    /// Seed a stack for a new multiline stream in `file_uri` from the
    /// brackets remembered from the last accepted completion there.
    pub fn seed_multiline(&self, file_uri: &str) -> BracketStack {
        let stack = self
            .unmatched_by_file
            .lock()
            .unwrap()
            .get(file_uri)
            .cloned()
            .unwrap_or_default();
        BracketStack { stack, seen_non_whitespace: false }
    }

    /// Seed a stack for a single-line completion from the unclosed openers
    /// on the current line (prefix tail + suffix head), plus an opener
    /// pushed for each closer that begins the suffix so overwriting it is
    /// legal.
    pub fn seed_single_line(&self, prefix_tail: &str, suffix_head: &str) -> BracketStack {
        let mut stack = Vec::new();
        for ch in prefix_tail.chars().chain(suffix_head.chars()) {
            if OPENERS.contains(&ch) {
                stack.push(ch);
            } else if CLOSERS.contains(&ch) {
                if let Some(&top) = stack.last() {
                    if matches(top, ch) {
                        stack.pop();
                        continue;
                    }
                }
            }
        }
        for ch in suffix_head.chars() {
            if OPENERS.contains(&ch) {
                break;
            }
            if CLOSERS.contains(&ch) {
                let opener = OPENERS[CLOSERS.iter().position(|c| *c == ch).unwrap()];
                stack.push(opener);
            } else {
                break;
            }
        }
        BracketStack { stack, seen_non_whitespace: false }
    }
}

impl BracketStack {
    /// Feed one streamed character. Returns `false` once an unmatched
    /// closer has ended the stream (the caller should flush up to and
    /// including this character, then stop).
    pub fn push(&mut self, ch: char) -> bool {
        if OPENERS.contains(&ch) {
            self.stack.push(ch);
            self.seen_non_whitespace = true;
            return true;
        }
        if CLOSERS.contains(&ch) {
            if !self.seen_non_whitespace {
                // Closers before the first real character belong to
                // surrounding code; let them through unchecked.
                return true;
            }
            match self.stack.last() {
                Some(&top) if matches(top, ch) => {
                    self.stack.pop();
                    true
                }
                _ => false,
            }
        } else {
            if !ch.is_whitespace() {
                self.seen_non_whitespace = true;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_opener_is_remembered_after_accept() {
        let matcher = BracketMatcher::new();
        matcher.record_accepted("file:///a.rs", "fn foo() {\n    bar(");
        let mut stack = matcher.seed_multiline("file:///a.rs");
        assert!(stack.push(')'));
    }

    #[test]
    fn balanced_completion_leaves_nothing_to_seed() {
        let matcher = BracketMatcher::new();
        matcher.record_accepted("file:///a.rs", "fn foo() { bar() }");
        let mut stack = matcher.seed_multiline("file:///a.rs");
        assert!(!stack.push(')'));
    }

    #[test]
    fn unmatched_closer_ends_the_stream() {
        let mut stack = BracketStack { stack: Vec::new(), seen_non_whitespace: false };
        assert!(stack.push('x'));
        assert!(!stack.push(')'));
    }

    #[test]
    fn leading_closer_before_real_content_is_allowed() {
        let mut stack = BracketStack { stack: Vec::new(), seen_non_whitespace: false };
        assert!(stack.push(')'));
    }

    #[test]
    fn single_line_seed_pushes_opener_for_leading_suffix_closer() {
        let matcher = BracketMatcher::new();
        let mut stack = matcher.seed_single_line("let x = foo(", ")");
        assert!(stack.push(')'));
    }
}
