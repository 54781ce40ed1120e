//! Display/accept/reject lifecycle for triggered completions
//!
//! A completion that gets displayed is assumed rejected after a fixed
//! timeout unless accepted first, or unless a follow-up completion in the
//! same file within a short window shares its first line - in which case
//! the earlier timer is cancelled rather than letting it fire as a reject
//! the user never actually made.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use cortex_domain::entities::PendingCompletion;

use crate::metrics::Metrics;

struct Entry {
    completion: PendingCompletion,
    first_line: String,
    cancel: CancellationToken,
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Tracks every displayed-but-unresolved completion and arms its rejection
/// timer.
pub struct PendingRegistry {
    entries: DashMap<String, Entry>,
    rejection_timeout: Duration,
    dedup_window: Duration,
    metrics: Arc<dyn Metrics>,
}

impl PendingRegistry {
    pub fn new(rejection_timeout: Duration, dedup_window: Duration, metrics: Arc<dyn Metrics>) -> Self {
        Self { entries: DashMap::new(), rejection_timeout, dedup_window, metrics }
    }

    /// Register a freshly displayed completion. If an unresolved completion
    /// in the same file shares this one's intention within the dedup
    /// window, its rejection timer is cancelled instead of letting it fire -
    /// the user is still looking at the same suggestion, just refreshed.
    pub fn register_displayed(self: Arc<Self>, mut completion: PendingCompletion, first_line: String) {
        let now = now_ms();
        completion.displayed_at_ms = Some(now);

        for entry in self.entries.iter() {
            let displayed_at = entry.completion.displayed_at_ms.unwrap_or(0);
            if entry.completion.file_uri == completion.file_uri
                && !entry.completion.is_resolved()
                && entry.completion.represents_same_intention(&entry.first_line, &first_line)
                && now.saturating_sub(displayed_at) <= self.dedup_window.as_millis() as u64
            {
                entry.cancel.cancel();
            }
        }

        self.metrics.completion_displayed();

        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let request_id = completion.request_id.clone();
        let timeout = self.rejection_timeout;
        let registry = Arc::clone(&self);
        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = sleep(timeout) => registry.reject(&request_id),
            }
        });

        self.entries.insert(completion.request_id.clone(), Entry { completion, first_line, cancel });
    }

    /// Mark `request_id` accepted and cancel its rejection timer.
    pub fn accept(&self, request_id: &str) {
        if let Some(mut entry) = self.entries.get_mut(request_id) {
            if !entry.completion.is_resolved() {
                entry.completion.accepted = Some(true);
                entry.cancel.cancel();
                self.metrics.completion_accepted();
            }
        }
    }

    fn reject(&self, request_id: &str) {
        if let Some(mut entry) = self.entries.get_mut(request_id) {
            if !entry.completion.is_resolved() {
                entry.completion.accepted = Some(false);
            }
        }
    }

    /// Final disposition of `request_id`, if it has resolved.
    pub fn outcome(&self, request_id: &str) -> Option<bool> {
        self.entries.get(request_id).and_then(|e| e.completion.accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::InProcessMetrics;

    fn registry(rejection_timeout: Duration) -> Arc<PendingRegistry> {
        Arc::new(PendingRegistry::new(rejection_timeout, Duration::from_millis(500), Arc::new(InProcessMetrics::new())))
    }

    #[tokio::test]
    async fn accept_resolves_before_the_timer_fires() {
        let registry = registry(Duration::from_millis(50));
        let completion = PendingCompletion::new("r1", "file:///a.rs", 0, "pfx", "sfx");
        Arc::clone(&registry).register_displayed(completion, "let x".into());
        registry.accept("r1");
        assert_eq!(registry.outcome("r1"), Some(true));
        sleep(Duration::from_millis(80)).await;
        assert_eq!(registry.outcome("r1"), Some(true));
    }

    #[tokio::test]
    async fn unaccepted_completion_rejects_after_timeout() {
        let registry = registry(Duration::from_millis(20));
        let completion = PendingCompletion::new("r1", "file:///a.rs", 0, "pfx", "sfx");
        Arc::clone(&registry).register_displayed(completion, "let x".into());
        sleep(Duration::from_millis(60)).await;
        assert_eq!(registry.outcome("r1"), Some(false));
    }

    #[tokio::test]
    async fn follow_up_in_dedup_window_cancels_earlier_rejection() {
        let registry = registry(Duration::from_millis(30));
        let first = PendingCompletion::new("r1", "file:///a.rs", 0, "pfx", "sfx");
        Arc::clone(&registry).register_displayed(first, "let x = 1".into());
        let second = PendingCompletion::new("r2", "file:///a.rs", 1, "pfx2", "sfx2");
        Arc::clone(&registry).register_displayed(second, "let x = 1;".into());

        sleep(Duration::from_millis(60)).await;
        assert_eq!(registry.outcome("r1"), None);
    }
}
