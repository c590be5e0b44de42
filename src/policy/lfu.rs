//! # LFU (Least Frequently Used) Policy with Decay
//!
//! This module provides the default eviction policy for
//! [`BoundedStore`](crate::store::BoundedStore). It keeps a usage count per
//! key and nominates the key with the lowest count as the eviction victim.
//! Counts are halved periodically ("decay") so that keys which were hot long
//! ago lose priority and newer keys are not starved.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuPolicy<K>                                    │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  FrequencyIndex<K>                                                 │ │
//!   │   │                                                                    │ │
//!   │   │  ┌─────────┬──────────────────────────────────────────────────┐    │ │
//!   │   │  │   Key   │  (Count)                                         │    │ │
//!   │   │  ├─────────┼──────────────────────────────────────────────────┤    │ │
//!   │   │  │ page_3  │   2  ← replace(): lowest, earliest among ties    │    │ │
//!   │   │  │ page_2  │   3                                              │    │ │
//!   │   │  │ page_4  │   7                                              │    │ │
//!   │   │  │ page_1  │  15                                              │    │ │
//!   │   │  └─────────┴──────────────────────────────────────────────────┘    │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   decay_counter: u64   (usage events since last decay)                   │
//!   │   decay_border:  u64   (decay when counter reaches this)                 │
//!   │   sink: Arc<dyn DiagnosticSink<K>>                                       │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency Lifecycle
//!
//! ```text
//!   insert(key)   (untracked)
//!        │
//!        ▼
//!   ┌─────────────────┐
//!   │ Count = 1       │  ← Baseline
//!   └─────────────────┘
//!        │  same call: increment(key)
//!        ▼
//!   ┌─────────────────┐
//!   │ Count = 2       │  ← A brand-new key always leaves insert at 2
//!   └─────────────────┘
//!        │
//!        │ insert(key) again / increment(key)
//!        ▼
//!   ┌─────────────────┐
//!   │ Count += 1      │  ← Every usage event
//!   └─────────────────┘
//!        │
//!        │ decay_counter reaches decay_border
//!        ▼
//!   ┌─────────────────┐
//!   │ Count /= 2      │  ← Every tracked key, floor division
//!   └─────────────────┘
//!        │
//!        │ remove(key)
//!        ▼
//!   ┌─────────────────┐
//!   │ Untracked       │
//!   └─────────────────┘
//! ```
//!
//! ## Decay Counter
//!
//! ```text
//!   increment(key):
//!     1. count(key) += 1
//!     2. decay_counter += 1
//!     3. decay_counter >= decay_border?  → halve all counts, counter = 0
//!
//!   remove(key):
//!     1. untrack key
//!     2. decay_counter += 1                (no check here)
//! ```
//!
//! Increment happens before the decay check, so the key that triggers a
//! decay is halved together with everything else in the same call. Removals
//! advance the counter without checking it; the next increment then decays
//! even if the counter has already passed the border.
//!
//! ## Core Operations
//!
//! | Method           | Complexity | Description                               |
//! |------------------|------------|-------------------------------------------|
//! | `insert(&k)`     | O(log n)   | Track at 1 if new, then increment         |
//! | `increment(&k)`  | O(log n)*  | Count + 1, maybe decay                    |
//! | `remove(&k)`     | O(log n)   | Untrack, advance decay counter            |
//! | `replace()`      | O(log n)   | Peek lowest-count key                     |
//! | `frequency(&k)`  | O(1)       | Current count                             |
//!
//! \* O(n log n) on the call that triggers a decay.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::policy::lfu::LfuPolicy;
//! use lfukit::traits::{EvictionPolicy, FrequencyPolicy};
//!
//! let mut policy = LfuPolicy::new(100);
//! policy.insert(&"a");
//! policy.insert(&"b");
//! policy.increment(&"b").unwrap();
//!
//! assert_eq!(policy.frequency(&"a"), Some(2));
//! assert_eq!(policy.frequency(&"b"), Some(3));
//! assert_eq!(policy.replace(), Ok("a"));
//! ```
//!
//! ## Thread Safety
//!
//! - `LfuPolicy` is **NOT thread-safe** on its own
//! - It is only touched by a store while the store's lock is held

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::diagnostics::{DiagnosticSink, PolicyEvent, SharedSink, TracingSink};
use crate::ds::FrequencyIndex;
use crate::error::CacheError;
use crate::traits::{EvictionPolicy, FrequencyPolicy};

/// Usage events between two decays when nothing else is configured.
pub const DEFAULT_DECAY_BORDER: u64 = 100;

/// Count assigned to a key when it is first tracked.
pub const BASELINE_FREQUENCY: u64 = 1;

/// LFU policy with periodic halving of all counts.
///
/// See module-level documentation for details.
pub struct LfuPolicy<K> {
    index: FrequencyIndex<K>,
    decay_counter: u64,
    decay_border: u64,
    decays: u64,
    sink: SharedSink<K>,
}

impl<K> LfuPolicy<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates a policy that reports to a [`TracingSink`].
    ///
    /// A `decay_border` of 0 decays on every usage event, same as 1.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuPolicy;
    /// use lfukit::traits::EvictionPolicy;
    ///
    /// let policy: LfuPolicy<u64> = LfuPolicy::new(100);
    /// assert_eq!(policy.decay_border(), 100);
    /// assert!(policy.is_empty());
    /// ```
    pub fn new(decay_border: u64) -> Self {
        Self::with_shared_sink(decay_border, Arc::new(TracingSink))
    }
}

impl<K> LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a policy that reports to `sink`.
    pub fn with_sink<S>(decay_border: u64, sink: Arc<S>) -> Self
    where
        S: DiagnosticSink<K> + 'static,
    {
        Self::with_shared_sink(decay_border, sink)
    }

    /// Creates a policy from an already type-erased sink handle.
    ///
    /// The sink receives a `Created` event before this returns.
    pub fn with_shared_sink(decay_border: u64, sink: SharedSink<K>) -> Self {
        sink.record(PolicyEvent::Created { decay_border });
        Self {
            index: FrequencyIndex::new(),
            decay_counter: 0,
            decay_border,
            decays: 0,
            sink,
        }
    }

    /// Usage events after which all counts are halved.
    #[inline]
    pub fn decay_border(&self) -> u64 {
        self.decay_border
    }

    /// Usage events recorded since the last decay.
    #[inline]
    pub fn decay_counter(&self) -> u64 {
        self.decay_counter
    }

    /// Number of decays performed since creation.
    #[inline]
    pub fn decays(&self) -> u64 {
        self.decays
    }

    /// Tracked `(key, count)` pairs in eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuPolicy;
    /// use lfukit::traits::EvictionPolicy;
    ///
    /// let mut policy = LfuPolicy::new(100);
    /// policy.insert(&1);
    /// policy.insert(&2);
    /// policy.insert(&1);
    ///
    /// assert_eq!(policy.ranking(), vec![(2, 2), (1, 3)]);
    /// ```
    pub fn ranking(&self) -> Vec<(K, u64)> {
        self.index
            .iter()
            .map(|(key, count)| (key.clone(), count))
            .collect()
    }

    /// Bumps a tracked key and runs the decay check.
    fn touch(&mut self, key: &K) -> Option<u64> {
        let count = self.index.increment(key)?;
        self.decay_counter = self.decay_counter.saturating_add(1);
        self.sink.record(PolicyEvent::Incremented {
            key,
            count,
            decay_counter: self.decay_counter,
        });
        if self.decay_counter >= self.decay_border {
            self.decay();
        }
        Some(count)
    }

    fn decay(&mut self) {
        self.index.halve_all();
        self.decay_counter = 0;
        self.decays += 1;
        self.sink.record(PolicyEvent::Decayed {
            tracked: self.index.len(),
        });
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants (debug/test builds only).
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: &K) {
        if !self.index.contains(key) {
            self.index.insert(key.clone(), BASELINE_FREQUENCY);
            self.sink.record(PolicyEvent::Inserted { key });
        }
        self.touch(key);
    }

    fn remove(&mut self, key: &K) -> Result<(), CacheError> {
        self.index.remove(key).ok_or(CacheError::KeyNotFound)?;
        self.sink.record(PolicyEvent::Removed { key });
        self.decay_counter = self.decay_counter.saturating_add(1);
        Ok(())
    }

    fn replace(&self) -> Result<K, CacheError> {
        self.index
            .peek_min()
            .map(|(key, _)| key.clone())
            .ok_or(CacheError::EmptyPolicy)
    }

    fn increment(&mut self, key: &K) -> Result<(), CacheError> {
        self.touch(key).map(|_| ()).ok_or(CacheError::KeyNotFound)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.decay_counter = 0;
    }
}

impl<K> FrequencyPolicy<K> for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn frequency(&self, key: &K) -> Option<u64> {
        self.index.count_of(key)
    }
}

impl<K> Default for LfuPolicy<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_BORDER)
    }
}

impl<K> fmt::Debug for LfuPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuPolicy")
            .field("tracked", &self.index.len())
            .field("decay_counter", &self.decay_counter)
            .field("decay_border", &self.decay_border)
            .field("decays", &self.decays)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{OwnedPolicyEvent, RecordingSink};

    fn quiet<K: Eq + Hash + Clone + Send + 'static>(border: u64) -> LfuPolicy<K> {
        LfuPolicy::with_shared_sink(border, Arc::new(crate::diagnostics::NoopSink))
    }

    // ==============================================
    // INSERT
    // ==============================================
    mod insert {
        use super::*;

        #[test]
        fn new_key_lands_at_two() {
            let mut policy = quiet(100);
            policy.insert(&"a");
            assert_eq!(policy.frequency(&"a"), Some(BASELINE_FREQUENCY + 1));
            assert_eq!(policy.len(), 1);
        }

        #[test]
        fn reinsert_is_plain_increment() {
            let mut policy = quiet(100);
            policy.insert(&"a");
            policy.insert(&"a");
            policy.insert(&"a");
            assert_eq!(policy.frequency(&"a"), Some(4));
            assert_eq!(policy.len(), 1);
            policy.debug_validate_invariants();
        }

        #[test]
        fn insert_counts_as_usage_event() {
            let mut policy = quiet(100);
            policy.insert(&1);
            policy.insert(&2);
            assert_eq!(policy.decay_counter(), 2);
        }

        #[test]
        fn insert_emits_inserted_then_incremented() {
            let sink = Arc::new(RecordingSink::new());
            let mut policy = LfuPolicy::with_sink(100, sink.clone());
            sink.take();
            policy.insert(&"k");
            policy.insert(&"k");

            assert_eq!(
                sink.events(),
                vec![
                    OwnedPolicyEvent::Inserted { key: "k" },
                    OwnedPolicyEvent::Incremented {
                        key: "k",
                        count: 2,
                        decay_counter: 1,
                    },
                    OwnedPolicyEvent::Incremented {
                        key: "k",
                        count: 3,
                        decay_counter: 2,
                    },
                ]
            );
        }
    }

    // ==============================================
    // REMOVE
    // ==============================================
    mod remove {
        use super::*;

        #[test]
        fn remove_untracks_key() {
            let mut policy = quiet(100);
            policy.insert(&"a");
            assert_eq!(policy.remove(&"a"), Ok(()));
            assert!(!policy.contains(&"a"));
            assert_eq!(policy.frequency(&"a"), None);
            assert!(policy.is_empty());
        }

        #[test]
        fn remove_missing_key_fails() {
            let mut policy: LfuPolicy<&str> = quiet(100);
            assert_eq!(policy.remove(&"ghost"), Err(CacheError::KeyNotFound));
            assert_eq!(policy.decay_counter(), 0);
        }

        #[test]
        fn remove_advances_counter_without_decaying() {
            let mut policy = quiet(3);
            policy.insert(&1);
            policy.insert(&2);
            // counter = 2
            policy.remove(&2).unwrap();
            // counter = 3 = border, no decay yet
            assert_eq!(policy.decay_counter(), 3);
            assert_eq!(policy.decays(), 0);
            assert_eq!(policy.frequency(&1), Some(2));
        }

        #[test]
        fn overshoot_from_removes_decays_on_next_increment() {
            let mut policy = quiet(3);
            policy.insert(&1);
            policy.insert(&2);
            policy.insert(&3);
            // third insert decays: 1 -> 1, 2 -> 1, 3 -> 1
            assert_eq!(policy.decays(), 1);
            policy.insert(&4);
            policy.insert(&5);
            policy.remove(&4).unwrap();
            policy.remove(&5).unwrap();
            assert_eq!(policy.decay_counter(), 4);

            policy.increment(&1).unwrap();
            assert_eq!(policy.decays(), 2);
            assert_eq!(policy.decay_counter(), 0);
            assert_eq!(policy.frequency(&1), Some(1));
        }

        #[test]
        fn remove_emits_removed() {
            let sink = Arc::new(RecordingSink::new());
            let mut policy = LfuPolicy::with_sink(100, sink.clone());
            policy.insert(&9u8);
            sink.take();
            policy.remove(&9).unwrap();
            assert_eq!(sink.events(), vec![OwnedPolicyEvent::Removed { key: 9 }]);
        }
    }

    // ==============================================
    // REPLACE
    // ==============================================
    mod replace {
        use super::*;

        #[test]
        fn empty_policy_has_no_victim() {
            let policy: LfuPolicy<u32> = quiet(100);
            assert_eq!(policy.replace(), Err(CacheError::EmptyPolicy));
        }

        #[test]
        fn picks_lowest_count() {
            let mut policy = quiet(100);
            policy.insert(&"hot");
            policy.insert(&"cold");
            policy.increment(&"hot").unwrap();
            assert_eq!(policy.replace(), Ok("cold"));
        }

        #[test]
        fn ties_pick_earliest_insert() {
            let mut policy = quiet(100);
            policy.insert(&"a");
            policy.insert(&"b");
            policy.insert(&"c");
            assert_eq!(policy.replace(), Ok("a"));
        }

        #[test]
        fn replace_does_not_untrack() {
            let mut policy = quiet(100);
            policy.insert(&1);
            assert_eq!(policy.replace(), Ok(1));
            assert_eq!(policy.replace(), Ok(1));
            assert!(policy.contains(&1));
        }

        #[test]
        fn bumped_key_moves_behind_equal_counts() {
            let mut policy = quiet(100);
            policy.insert(&"a");
            policy.insert(&"b");
            policy.increment(&"a").unwrap();
            policy.increment(&"b").unwrap();
            // both at 3; "a" reached 3 first
            assert_eq!(policy.replace(), Ok("a"));
        }
    }

    // ==============================================
    // INCREMENT & DECAY
    // ==============================================
    mod decay {
        use super::*;

        #[test]
        fn increment_missing_key_fails() {
            let mut policy: LfuPolicy<&str> = quiet(100);
            assert_eq!(policy.increment(&"nope"), Err(CacheError::KeyNotFound));
            assert_eq!(policy.decay_counter(), 0);
        }

        #[test]
        fn decay_halves_every_count_at_border() {
            let mut policy = quiet(10);
            policy.insert(&"a"); // a=2, counter=1
            for _ in 0..7 {
                policy.increment(&"a").unwrap();
            }
            // a=9, counter=8
            policy.insert(&"b"); // b=2, counter=9
            assert_eq!(policy.decays(), 0);

            policy.increment(&"a").unwrap(); // a=10, counter=10 -> decay
            assert_eq!(policy.decays(), 1);
            assert_eq!(policy.decay_counter(), 0);
            assert_eq!(policy.frequency(&"a"), Some(5));
            assert_eq!(policy.frequency(&"b"), Some(1));
        }

        #[test]
        fn triggering_key_is_incremented_before_halving() {
            let mut policy = quiet(2);
            policy.insert(&"x"); // x=2, counter=1
            policy.increment(&"x").unwrap(); // x=3 then decay -> 1
            assert_eq!(policy.frequency(&"x"), Some(1));
        }

        #[test]
        fn decay_can_reach_zero() {
            let mut policy = quiet(3);
            policy.insert(&"a"); // a=2
            policy.insert(&"b"); // b=2
            policy.insert(&"c"); // c=2, decay -> all 1
            assert_eq!(policy.ranking(), vec![("a", 1), ("b", 1), ("c", 1)]);

            policy.increment(&"c").unwrap(); // c=2
            policy.increment(&"c").unwrap(); // c=3
            policy.increment(&"c").unwrap(); // c=4, decay -> a=0, b=0, c=2
            assert_eq!(policy.ranking(), vec![("a", 0), ("b", 0), ("c", 2)]);
            assert_eq!(policy.replace(), Ok("a"));
        }

        #[test]
        fn zero_border_decays_every_event() {
            let mut policy = quiet(0);
            policy.insert(&1); // 2 -> 1
            assert_eq!(policy.frequency(&1), Some(1));
            policy.increment(&1).unwrap(); // 2 -> 1
            assert_eq!(policy.frequency(&1), Some(1));
            assert_eq!(policy.decays(), 2);
        }

        #[test]
        fn decay_lets_new_keys_overtake_old_hot_keys() {
            let mut policy = quiet(20);
            policy.insert(&"old");
            for _ in 0..9 {
                policy.increment(&"old").unwrap();
            }
            // old=11, counter=10
            policy.insert(&"new"); // new=2, counter=11
            for _ in 0..8 {
                policy.increment(&"new").unwrap();
            }
            // new=10, counter=19
            policy.increment(&"new").unwrap();
            // new=11, counter=20 -> decay: old=5, new=5
            assert_eq!(policy.frequency(&"old"), Some(5));
            assert_eq!(policy.frequency(&"new"), Some(5));
            // "old" held 5 first after the rebuild walk
            assert_eq!(policy.replace(), Ok("old"));
        }

        #[test]
        fn incremented_event_carries_counter_before_reset() {
            let sink = Arc::new(RecordingSink::new());
            let mut policy = LfuPolicy::with_sink(2, sink.clone());
            policy.insert(&"x");
            policy.insert(&"y");

            let events = sink.take();
            // the event that triggers a decay reports the border value
            assert_eq!(
                events[events.len() - 2],
                OwnedPolicyEvent::Incremented {
                    key: "y",
                    count: 2,
                    decay_counter: 2,
                }
            );
            assert_eq!(policy.decay_counter(), 0);
        }

        #[test]
        fn decay_emits_event_with_tracked_count() {
            let sink = Arc::new(RecordingSink::new());
            let mut policy = LfuPolicy::with_sink(2, sink.clone());
            policy.insert(&1u16);
            policy.insert(&2u16);

            let events = sink.events();
            assert_eq!(
                events.last(),
                Some(&OwnedPolicyEvent::Decayed { tracked: 2 })
            );
        }
    }

    // ==============================================
    // HOUSEKEEPING
    // ==============================================
    mod housekeeping {
        use super::*;

        #[test]
        fn clear_resets_tracking_and_counter() {
            let mut policy = quiet(100);
            policy.insert(&1);
            policy.insert(&2);
            policy.clear();
            assert!(policy.is_empty());
            assert_eq!(policy.decay_counter(), 0);
            assert_eq!(policy.replace(), Err(CacheError::EmptyPolicy));
        }

        #[test]
        fn construction_reports_decay_border() {
            let sink: Arc<RecordingSink<u8>> = Arc::new(RecordingSink::new());
            let _policy = LfuPolicy::with_sink(42, sink.clone());
            assert_eq!(
                sink.events(),
                vec![OwnedPolicyEvent::Created { decay_border: 42 }]
            );
        }

        #[test]
        fn debug_needs_no_key_bounds() {
            fn describe<K>(policy: &LfuPolicy<K>) -> String {
                format!("{:?}", policy)
            }

            let mut policy = quiet(5);
            policy.insert(&1u8);
            let dbg = describe(&policy);
            assert!(dbg.contains("tracked: 1"));
            assert!(dbg.contains("decay_counter: 1"));
        }

        #[test]
        fn default_uses_default_border() {
            let policy: LfuPolicy<String> = LfuPolicy::default();
            assert_eq!(policy.decay_border(), DEFAULT_DECAY_BORDER);
        }

        #[test]
        fn debug_output_is_summarised() {
            let mut policy = quiet(7);
            policy.insert(&"a");
            let dbg = format!("{:?}", policy);
            assert!(dbg.contains("LfuPolicy"));
            assert!(dbg.contains("tracked: 1"));
            assert!(dbg.contains("decay_border: 7"));
        }

        #[test]
        fn policy_is_send() {
            fn assert_send<T: Send>() {}
            assert_send::<LfuPolicy<u64>>();
        }
    }
}
