//! Store-level counters.
//!
//! Counters live inside the store's locked state, so plain integers are
//! enough; [`StoreMetrics`] is the copy handed out to callers.

/// Snapshot of store-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Reads that found their key.
    pub hits: u64,
    /// Reads that failed with `KeyNotFound`.
    pub misses: u64,
    /// Writes that added a new key.
    pub inserts: u64,
    /// Writes that replaced the value of a present key.
    pub updates: u64,
    /// Entries dropped to make room for a write.
    pub evictions: u64,
    /// Victims nominated by the policy that were already gone from the store.
    pub stale_skips: u64,
    /// Deletes that removed a present key.
    pub deletes: u64,
}

/// Mutable counters behind the store lock.
#[derive(Debug, Default)]
pub(crate) struct StoreCounters {
    metrics: StoreMetrics,
}

impl StoreCounters {
    pub(crate) fn snapshot(&self) -> StoreMetrics {
        self.metrics
    }

    pub(crate) fn inc_hit(&mut self) {
        self.metrics.hits += 1;
    }

    pub(crate) fn inc_miss(&mut self) {
        self.metrics.misses += 1;
    }

    pub(crate) fn inc_insert(&mut self) {
        self.metrics.inserts += 1;
    }

    pub(crate) fn inc_update(&mut self) {
        self.metrics.updates += 1;
    }

    pub(crate) fn inc_eviction(&mut self) {
        self.metrics.evictions += 1;
    }

    pub(crate) fn inc_stale_skip(&mut self) {
        self.metrics.stale_skips += 1;
    }

    pub(crate) fn inc_delete(&mut self) {
        self.metrics.deletes += 1;
    }
}
