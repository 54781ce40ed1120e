//! Coalescing debouncer for completion triggers
//!
//! Every trigger gets a fresh sequence number. After the configured delay,
//! only the request that was still the latest when the timer fired is told
//! to proceed; anything superseded in the meantime resolves as debounced.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request and sleep `delay_ms`. Returns `true` if this
    /// request was superseded by a later one while sleeping (debounced,
    /// produce no completion), `false` if it is still the latest and should
    /// proceed.
    pub async fn delay(&self, delay_ms: u64) -> bool {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        my_generation != self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn sole_request_is_not_debounced() {
        let debouncer = Debouncer::new();
        assert!(!debouncer.delay(5).await);
    }

    #[tokio::test]
    async fn earlier_request_is_debounced_by_a_later_one() {
        let debouncer = Debouncer::new();

        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.delay(30).await })
        };
        tokio::time::sleep(StdDuration::from_millis(5)).await;
        let second = debouncer.delay(5).await;

        assert!(!second, "the later request must proceed");
        assert!(
            first.await.unwrap(),
            "the earlier request must report itself debounced"
        );
    }

    #[tokio::test]
    async fn sequential_requests_each_proceed() {
        let debouncer = Debouncer::new();
        assert!(!debouncer.delay(1).await);
        assert!(!debouncer.delay(1).await);
    }
}
