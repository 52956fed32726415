//! In-memory usage statistics.

use reacto_core::{UserId, UsageStatistics};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// Per-handler, per-user counts of claimed events, kept in memory.
///
/// Cloning shares the underlying counts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatistics {
    counts: Arc<Mutex<HashMap<String, HashMap<UserId, u64>>>>,
}

impl InMemoryStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total events claimed by `handler`.
    pub fn count(&self, handler: &str) -> u64 {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts
            .get(handler)
            .map(|users| users.values().sum())
            .unwrap_or(0)
    }

    /// Events claimed by `handler` on behalf of `user_id`.
    pub fn count_for(&self, handler: &str, user_id: &UserId) -> u64 {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts
            .get(handler)
            .and_then(|users| users.get(user_id))
            .copied()
            .unwrap_or(0)
    }

    /// Handler names with at least one claimed event, sorted.
    pub fn handlers(&self) -> Vec<String> {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = counts.keys().cloned().collect();
        names.sort();
        names
    }
}

impl UsageStatistics for InMemoryStatistics {
    fn increment(&self, handler: &str, user_id: &UserId) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        *counts
            .entry(handler.to_owned())
            .or_default()
            .entry(user_id.clone())
            .or_insert(0) += 1;
    }
}
