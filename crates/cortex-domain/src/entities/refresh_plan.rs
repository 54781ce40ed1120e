//! Refresh plan entity: the planner's output for one tag

use crate::entities::tag::PathAndCacheKey;
use serde::{Deserialize, Serialize};

/// Four disjoint ordered sequences of work produced by the refresh planner for
/// a single tag, plus a side list of files whose timestamp needs bumping.
///
/// `compute`, `del`, `add_tag` and `remove_tag` are disjoint partitions of the
/// files observed during planning; `touch_last_updated` overlaps none of them
/// and only ever carries unchanged files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshPlan {
    /// New content that requires full artifact work (no existing global cache entry)
    pub compute: Vec<PathAndCacheKey>,
    /// Content to drop entirely (path missing, and not referenced by any other tag)
    pub del: Vec<PathAndCacheKey>,
    /// Content already present globally under some other tag — just link it
    pub add_tag: Vec<PathAndCacheKey>,
    /// Content still referenced elsewhere after unlinking this tag — just unlink
    pub remove_tag: Vec<PathAndCacheKey>,
    /// Unchanged files whose last-updated timestamp should advance
    pub touch_last_updated: Vec<PathAndCacheKey>,
}

impl RefreshPlan {
    /// True when every sequence is empty: nothing for the indexer to do.
    pub fn is_empty(&self) -> bool {
        self.compute.is_empty()
            && self.del.is_empty()
            && self.add_tag.is_empty()
            && self.remove_tag.is_empty()
            && self.touch_last_updated.is_empty()
    }

    /// Total number of items across every sequence except `touch_last_updated`,
    /// i.e. the amount of catalog-mutating work this plan represents.
    pub fn mutation_count(&self) -> usize {
        self.compute.len() + self.del.len() + self.add_tag.len() + self.remove_tag.len()
    }

    /// Split the plan into batches of at most `batch_size` items each,
    /// preserving the execution order documented for [`RefreshPlanKind`]:
    /// compute first, then add_tag, then remove_tag, then del.
    pub fn batches(&self, batch_size: usize) -> Vec<RefreshPlan> {
        debug_assert!(batch_size > 0);
        let mut batches = Vec::new();
        let mut current = RefreshPlan::default();
        let mut current_len = 0usize;

        macro_rules! push_items {
            ($field:ident) => {
                for item in &self.$field {
                    if current_len == batch_size {
                        batches.push(std::mem::take(&mut current));
                        current_len = 0;
                    }
                    current.$field.push(item.clone());
                    current_len += 1;
                }
            };
        }
        push_items!(compute);
        push_items!(add_tag);
        push_items!(remove_tag);
        push_items!(del);

        if current_len > 0 {
            batches.push(current);
        }
        batches
    }
}

/// The kind of catalog mutation a [`PathAndCacheKey`] item represents when the
/// planner's completion closure is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshPlanKind {
    /// New content; upsert `(path, cache_key, now)` and mark the global cache
    Compute,
    /// Link existing global-cache content to this tag; same upsert as Compute
    Add,
    /// Unlink content from this tag; delete the matching row
    Remove,
    /// Rewrite only `cache_key` and timestamp for an unchanged `(path, tag)`
    UpdateLastUpdated,
    /// Alias of Compute used when a newer version replaces a tracked path
    UpdateNewVersion,
    /// Accounting-only no-op; never mutates storage
    UpdateOldVersion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn item(n: u8) -> PathAndCacheKey {
        PathAndCacheKey::new(PathBuf::from(format!("/f{n}")), format!("key{n}"))
    }

    #[test]
    fn empty_plan_reports_empty() {
        assert!(RefreshPlan::default().is_empty());
    }

    #[test]
    fn batches_preserve_compute_before_del_ordering() {
        let plan = RefreshPlan {
            compute: vec![item(1), item(2)],
            del: vec![item(3)],
            ..Default::default()
        };
        let batches = plan.batches(2);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].compute.len(), 2);
        assert_eq!(batches[1].del.len(), 1);
    }

    #[test]
    fn mutation_count_excludes_touch_last_updated() {
        let plan = RefreshPlan {
            compute: vec![item(1)],
            touch_last_updated: vec![item(2), item(3)],
            ..Default::default()
        };
        assert_eq!(plan.mutation_count(), 1);
    }
}
