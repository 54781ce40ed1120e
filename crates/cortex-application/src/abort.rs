//! Abort registry
//!
//! A map from message id to cancellation token. Cancellation is cooperative:
//! callers poll `CancellationToken::is_cancelled()` at the suspension points
//! documented for each long-running operation (between directory walks,
//! between batches, between plan items, between stream chunks).

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

/// Registry of in-flight cancellable operations, keyed by caller-assigned id.
#[derive(Default)]
pub struct AbortRegistry {
    tokens: DashMap<String, CancellationToken>,
}

impl AbortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh cancellation token for `id`, replacing any prior one.
    pub fn register(&self, id: impl Into<String>) -> CancellationToken {
        let token = CancellationToken::new();
        self.tokens.insert(id.into(), token.clone());
        token
    }

    /// Signal cancellation for `id` and remove it from the registry. A no-op
    /// if `id` is not (or no longer) registered.
    pub fn abort(&self, id: &str) {
        if let Some((_, token)) = self.tokens.remove(id) {
            token.cancel();
        }
    }

    /// Remove `id` without cancelling it (the operation finished normally).
    pub fn complete(&self, id: &str) {
        self.tokens.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_cancels_the_registered_token() {
        let registry = AbortRegistry::new();
        let token = registry.register("req-1");
        assert!(!token.is_cancelled());
        registry.abort("req-1");
        assert!(token.is_cancelled());
    }

    #[test]
    fn abort_of_unknown_id_is_a_no_op() {
        let registry = AbortRegistry::new();
        registry.abort("missing");
    }

    #[test]
    fn complete_removes_without_cancelling() {
        let registry = AbortRegistry::new();
        let token = registry.register("req-1");
        registry.complete("req-1");
        assert!(!token.is_cancelled());
    }
}
