//! Search repository implementations
//!
//! Backs the full-text/hybrid per-artifact index described for keyword and
//! combined semantic+keyword retrieval.

mod bm25;

pub use bm25::Bm25SearchRepository;
