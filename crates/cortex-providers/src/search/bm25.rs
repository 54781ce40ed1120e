//! BM25 keyword search repository
//!
//! A single flat corpus of indexed chunks scored with the standard BM25
//! formula, filtered by a `collection` path prefix. `hybrid_search` blends
//! the BM25 score with the vector store's top candidates for the same
//! query, weighted by the configured hybrid weights.

use crate::constants::{HYBRID_SEARCH_BM25_B, HYBRID_SEARCH_BM25_K1, HYBRID_SEARCH_BM25_WEIGHT, HYBRID_SEARCH_SEMANTIC_WEIGHT};
use async_trait::async_trait;
use cortex_domain::entities::Chunk;
use cortex_domain::error::Result;
use cortex_domain::ports::providers::VectorStoreProvider;
use cortex_domain::repositories::{SearchRepository, SearchStats};
use cortex_domain::value_objects::SearchResult;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

struct IndexedDocument {
    chunk: Chunk,
    term_freqs: HashMap<String, u32>,
    length: u32,
}

/// BM25-scored keyword index, optionally blended with a vector store for
/// hybrid search.
pub struct Bm25SearchRepository {
    vector_store: Option<Arc<dyn VectorStoreProvider>>,
    documents: DashMap<String, IndexedDocument>,
    total_length: AtomicU64,
    query_count: AtomicU64,
}

impl Bm25SearchRepository {
    pub fn new(vector_store: Option<Arc<dyn VectorStoreProvider>>) -> Self {
        Self {
            vector_store,
            documents: DashMap::new(),
            total_length: AtomicU64::new(0),
            query_count: AtomicU64::new(0),
        }
    }

    fn doc_id(chunk: &Chunk) -> String {
        format!("{}\u{0}{}\u{0}{}", chunk.filepath, chunk.digest, chunk.index)
    }

    fn average_length(&self) -> f64 {
        let count = self.documents.len();
        if count == 0 {
            return 0.0;
        }
        self.total_length.load(Ordering::Relaxed) as f64 / count as f64
    }

    fn score(&self, query_terms: &[String], doc: &IndexedDocument, avg_len: f64) -> f64 {
        let n = self.documents.len() as f64;
        let mut score = 0.0;
        for term in query_terms {
            let doc_freq = self
                .documents
                .iter()
                .filter(|entry| entry.value().term_freqs.contains_key(term))
                .count() as f64;
            if doc_freq == 0.0 {
                continue;
            }
            let idf = ((n - doc_freq + 0.5) / (doc_freq + 0.5) + 1.0).ln();
            let tf = *doc.term_freqs.get(term).unwrap_or(&0) as f64;
            let len_norm = 1.0 - HYBRID_SEARCH_BM25_B as f64 + HYBRID_SEARCH_BM25_B as f64 * (doc.length as f64 / avg_len.max(1.0));
            score += idf * (tf * (HYBRID_SEARCH_BM25_K1 as f64 + 1.0)) / (tf + HYBRID_SEARCH_BM25_K1 as f64 * len_norm);
        }
        score
    }

    fn keyword_search(&self, collection: &str, query: &str, limit: usize) -> Vec<SearchResult> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }
        let avg_len = self.average_length();
        let mut scored: Vec<(f64, Chunk)> = self
            .documents
            .iter()
            .filter(|entry| collection.is_empty() || entry.value().chunk.filepath.starts_with(collection))
            .map(|entry| (self.score(&terms, entry.value(), avg_len), entry.value().chunk.clone()))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(score, chunk)| SearchResult {
                id: Self::doc_id(&chunk),
                file_path: chunk.filepath,
                start_line: chunk.start_line,
                content: chunk.content,
                score,
                language: cortex_domain::entities::Language::PlainText,
            })
            .collect()
    }
}

#[async_trait]
impl SearchRepository for Bm25SearchRepository {
    async fn semantic_search(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        match &self.vector_store {
            Some(store) => store.search_similar(collection, query_vector, limit, filter).await,
            None => Ok(Vec::new()),
        }
    }

    async fn index_for_hybrid_search(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            let terms = tokenize(&chunk.content);
            let length = terms.len() as u32;
            let mut term_freqs = HashMap::new();
            for term in terms {
                *term_freqs.entry(term).or_insert(0u32) += 1;
            }
            let id = Self::doc_id(chunk);
            if let Some(previous) = self.documents.get(&id) {
                self.total_length.fetch_sub(previous.length as u64, Ordering::Relaxed);
            }
            self.total_length.fetch_add(length as u64, Ordering::Relaxed);
            self.documents.insert(id, IndexedDocument { chunk: chunk.clone(), term_freqs, length });
        }
        Ok(())
    }

    async fn hybrid_search(
        &self,
        collection: &str,
        query: &str,
        query_vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        self.query_count.fetch_add(1, Ordering::Relaxed);
        let keyword_results = self.keyword_search(collection, query, limit);
        let semantic_results = self.semantic_search(collection, query_vector, limit, None).await?;

        let mut combined: HashMap<String, SearchResult> = HashMap::new();
        for mut result in keyword_results {
            result.score *= HYBRID_SEARCH_BM25_WEIGHT as f64;
            combined.insert(result.id.clone(), result);
        }
        for mut result in semantic_results {
            result.score *= HYBRID_SEARCH_SEMANTIC_WEIGHT as f64;
            combined
                .entry(result.id.clone())
                .and_modify(|existing| existing.score += result.score)
                .or_insert(result);
        }

        let mut merged: Vec<SearchResult> = combined.into_values().collect();
        merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        merged.truncate(limit);
        Ok(merged)
    }

    async fn clear_index(&self, collection: &str) -> Result<()> {
        if collection.is_empty() {
            self.documents.clear();
            self.total_length.store(0, Ordering::Relaxed);
            return Ok(());
        }
        let stale: Vec<String> = self
            .documents
            .iter()
            .filter(|entry| entry.value().chunk.filepath.starts_with(collection))
            .map(|entry| entry.key().clone())
            .collect();
        for key in stale {
            if let Some((_, doc)) = self.documents.remove(&key) {
                self.total_length.fetch_sub(doc.length as u64, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    async fn stats(&self) -> Result<SearchStats> {
        Ok(SearchStats {
            total_queries: self.query_count.load(Ordering::Relaxed),
            avg_response_time_ms: 0.0,
            cache_hit_rate: 0.0,
            indexed_documents: self.documents.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(path: &str, content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            start_line: 0,
            end_line: 0,
            filepath: path.to_string(),
            digest: "abc".to_string(),
            index: 0,
        }
    }

    #[tokio::test]
    async fn keyword_search_finds_matching_term() {
        let repo = Bm25SearchRepository::new(None);
        repo.index_for_hybrid_search(&[
            chunk("/repo/a.rs", "fn authenticate_user() {}"),
            chunk("/repo/b.rs", "fn render_widget() {}"),
        ])
        .await
        .unwrap();

        let results = repo.keyword_search("", "authenticate", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "/repo/a.rs");
    }

    #[tokio::test]
    async fn clear_index_with_empty_collection_clears_everything() {
        let repo = Bm25SearchRepository::new(None);
        repo.index_for_hybrid_search(&[chunk("/repo/a.rs", "fn a() {}")]).await.unwrap();
        repo.clear_index("").await.unwrap();
        assert!(repo.keyword_search("", "a", 10).is_empty());
    }

    #[tokio::test]
    async fn clear_index_scoped_to_collection_leaves_others() {
        let repo = Bm25SearchRepository::new(None);
        repo.index_for_hybrid_search(&[
            chunk("/repo/a.rs", "fn widget() {}"),
            chunk("/other/b.rs", "fn widget() {}"),
        ])
        .await
        .unwrap();
        repo.clear_index("/repo").await.unwrap();
        assert_eq!(repo.keyword_search("", "widget", 10).len(), 1);
    }
}
