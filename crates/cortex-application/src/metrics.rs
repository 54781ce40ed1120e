//! In-process metrics
//!
//! Lightweight counters for local observability only - nothing here is
//! shipped off-box. Counters are keyed by name in a [`DashMap`] rather than
//! a fixed struct of fields, so new counters can be added without touching
//! this module's public surface.

use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Ambient counters port. Implementations must be cheap to call from hot
/// paths (plan application, stream filtering).
pub trait Metrics: Send + Sync {
    fn incr(&self, counter: &str, by: i64);
    fn get(&self, counter: &str) -> i64;

    fn files_indexed(&self, count: i64) {
        self.incr("files_indexed", count);
    }

    fn plan_size(&self, count: i64) {
        self.incr("plan_items", count);
    }

    fn completion_displayed(&self) {
        self.incr("completions_displayed", 1);
    }

    fn completion_accepted(&self) {
        self.incr("completions_accepted", 1);
    }
}

/// `dashmap`-backed default implementation.
#[derive(Default)]
pub struct InProcessMetrics {
    counters: DashMap<String, AtomicI64>,
}

impl InProcessMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Metrics for InProcessMetrics {
    fn incr(&self, counter: &str, by: i64) {
        self.counters
            .entry(counter.to_string())
            .or_insert_with(|| AtomicI64::new(0))
            .fetch_add(by, Ordering::Relaxed);
    }

    fn get(&self, counter: &str) -> i64 {
        self.counters
            .get(counter)
            .map(|v| v.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_counter_reads_zero() {
        let metrics = InProcessMetrics::new();
        assert_eq!(metrics.get("nope"), 0);
    }

    #[test]
    fn files_indexed_accumulates() {
        let metrics = InProcessMetrics::new();
        metrics.files_indexed(3);
        metrics.files_indexed(2);
        assert_eq!(metrics.get("files_indexed"), 5);
    }

    #[test]
    fn completion_displayed_and_accepted_are_independent() {
        let metrics = InProcessMetrics::new();
        metrics.completion_displayed();
        metrics.completion_displayed();
        metrics.completion_accepted();
        assert_eq!(metrics.get("completions_displayed"), 2);
        assert_eq!(metrics.get("completions_accepted"), 1);
    }
}
