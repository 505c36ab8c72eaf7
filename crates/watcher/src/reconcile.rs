//! Dedup of fetched posts against the last notified ID.

use crate::twitter::LatestPost;

/// Outcome of comparing a fetched post with the last seen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// The post has not been notified yet.
    pub is_new: bool,
}

/// A post is new when nothing has been seen yet or its ID differs.
///
/// Pure; the caller performs the notify/persist side effects.
#[must_use]
pub fn reconcile(last_seen: Option<u64>, candidate: &LatestPost) -> Reconciliation {
    Reconciliation {
        is_new: last_seen != Some(candidate.id),
    }
}
