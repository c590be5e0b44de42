//! Ordered frequency index with deterministic tie-breaking.
//!
//! Tracks one count per key and keeps all keys ordered ascending by count.
//! Keys that share a count are ordered by when their entry was (re)created:
//! the entry created first sits first. Every relocation (count change)
//! assigns a fresh sequence number, so a key that was just bumped lands
//! behind every other key with the same count.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                       FrequencyIndex Layout                                 │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐    │
//! │   │  order: BTreeMap<FrequencySlot, K>   (ascending count, then seq)  │    │
//! │   │                                                                   │    │
//! │   │    ┌──────────────────┬───────┐                                  │    │
//! │   │    │ (count, seq)     │  key  │                                  │    │
//! │   │    ├──────────────────┼───────┤                                  │    │
//! │   │    │ (2, seq=3)       │  "B"  │  ← first(): eviction candidate   │    │
//! │   │    │ (2, seq=5)       │  "C"  │                                  │    │
//! │   │    │ (4, seq=6)       │  "A"  │                                  │    │
//! │   │    └──────────────────┴───────┘                                  │    │
//! │   └───────────────────────────────────────────────────────────────────┘    │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐    │
//! │   │  slots: FxHashMap<K, FrequencySlot>  (key → location in `order`)  │    │
//! │   └───────────────────────────────────────────────────────────────────┘    │
//! │                                                                             │
//! │   seq: 7  (monotonic counter for tie-breaking)                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Relocate Flow
//! ─────────────
//!   increment("B"):
//!     1. slot = slots["B"]              → (2, seq=3)
//!     2. key  = order.remove(slot)      → "B"
//!     3. order.insert((3, seq=7), "B")
//!     4. slots["B"] = (3, seq=7); seq += 1
//!
//! Halve Flow
//! ──────────
//!   halve_all():
//!     walk the old order ascending, re-inserting each key at count / 2
//!     with a fresh seq, so the relative order of all keys is kept
//! ```
//!
//! ## Operations
//!
//! | Operation     | Description                               | Complexity |
//! |---------------|-------------------------------------------|------------|
//! | `insert`      | Track key at a count (relocate if known)  | O(log n)   |
//! | `increment`   | Relocate key to count + 1                 | O(log n)   |
//! | `remove`      | Stop tracking key                         | O(log n)   |
//! | `peek_min`    | Lowest count, earliest among ties         | O(log n)   |
//! | `count_of`    | Current count for key                     | O(1)       |
//! | `halve_all`   | Floor-halve every count                   | O(n log n) |
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::ds::FrequencyIndex;
//!
//! let mut index: FrequencyIndex<&str> = FrequencyIndex::new();
//! index.insert("a", 1);
//! index.insert("b", 1);
//! index.increment(&"a");
//!
//! assert_eq!(index.peek_min(), Some((&"b", 1)));
//! assert_eq!(index.count_of(&"a"), Some(2));
//!
//! index.halve_all();
//! assert_eq!(index.count_of(&"a"), Some(1));
//! assert_eq!(index.count_of(&"b"), Some(0));
//! ```
//!
//! ## Thread Safety
//!
//! `FrequencyIndex` is not thread-safe. It is only ever touched under the
//! owning store's lock.
use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Location of a key inside the ordered index.
///
/// Ordered by `count` first, then by `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrequencySlot {
    count: u64,
    seq: u64,
}

impl FrequencySlot {
    /// Returns the count stored in this slot.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Count-ordered multi-index over keys.
///
/// # Type Parameters
///
/// - `K`: Key type (must be `Eq + Hash + Clone`)
///
/// # Example
///
/// ```
/// use lfukit::ds::FrequencyIndex;
///
/// let mut index = FrequencyIndex::new();
/// index.insert(10u64, 3);
/// index.insert(20u64, 1);
/// index.insert(30u64, 1);
///
/// // lowest count first, earliest insertion among ties
/// assert_eq!(index.peek_min(), Some((&20, 1)));
/// ```
#[derive(Debug)]
pub struct FrequencyIndex<K> {
    order: BTreeMap<FrequencySlot, K>,
    slots: FxHashMap<K, FrequencySlot>,
    seq: u64,
}

impl<K> FrequencyIndex<K> {
    /// Returns the number of tracked keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K> FrequencyIndex<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            slots: FxHashMap::default(),
            seq: 0,
        }
    }

    /// Creates an empty index with room for `capacity` keys in the side index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: BTreeMap::new(),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            seq: 0,
        }
    }

    /// Returns `true` if `key` is tracked.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Returns the current count for `key`, if tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::ds::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new();
    /// index.insert("page", 4);
    /// assert_eq!(index.count_of(&"page"), Some(4));
    /// assert_eq!(index.count_of(&"missing"), None);
    /// ```
    pub fn count_of(&self, key: &K) -> Option<u64> {
        self.slots.get(key).map(FrequencySlot::count)
    }

    /// Tracks `key` at `count` and returns the previous count, if any.
    ///
    /// An already tracked key is relocated and moves behind every other key
    /// that shares the new count.
    pub fn insert(&mut self, key: K, count: u64) -> Option<u64> {
        if self.slots.contains_key(&key) {
            return self.relocate(&key, count);
        }
        let slot = self.next_slot(count);
        self.order.insert(slot, key.clone());
        self.slots.insert(key, slot);
        None
    }

    /// Moves `key` to `count + 1` and returns the new count.
    ///
    /// Returns `None` if `key` is not tracked. Saturates at `u64::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::ds::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new();
    /// index.insert("a", 1);
    /// assert_eq!(index.increment(&"a"), Some(2));
    /// assert_eq!(index.increment(&"zzz"), None);
    /// ```
    pub fn increment(&mut self, key: &K) -> Option<u64> {
        let current = self.slots.get(key)?.count;
        let next = current.saturating_add(1);
        self.relocate(key, next);
        Some(next)
    }

    /// Stops tracking `key` and returns its last count.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let slot = self.slots.remove(key)?;
        self.order.remove(&slot);
        Some(slot.count)
    }

    /// Returns the key with the lowest count, earliest among ties.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        self.order
            .first_key_value()
            .map(|(slot, key)| (key, slot.count))
    }

    /// Replaces every count with `count / 2`, keeping relative order.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::ds::FrequencyIndex;
    ///
    /// let mut index = FrequencyIndex::new();
    /// index.insert("a", 7);
    /// index.insert("b", 1);
    /// index.halve_all();
    ///
    /// assert_eq!(index.count_of(&"a"), Some(3));
    /// assert_eq!(index.count_of(&"b"), Some(0));
    /// ```
    pub fn halve_all(&mut self) {
        let previous = std::mem::take(&mut self.order);
        for (slot, key) in previous {
            let halved = self.next_slot(slot.count / 2);
            if let Some(entry) = self.slots.get_mut(&key) {
                *entry = halved;
            }
            self.order.insert(halved, key);
        }
    }

    /// Iterates `(key, count)` pairs in eviction order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.order.iter().map(|(slot, key)| (key, slot.count))
    }

    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
        self.slots.clear();
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns `(key, count)` pairs in eviction order for debugging.
    pub fn debug_snapshot(&self) -> Vec<(K, u64)> {
        self.iter().map(|(key, count)| (key.clone(), count)).collect()
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants (debug/test builds only).
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.order.len(), self.slots.len());
        for (slot, key) in &self.order {
            assert_eq!(self.slots.get(key), Some(slot));
        }
    }

    fn relocate(&mut self, key: &K, count: u64) -> Option<u64> {
        let old = *self.slots.get(key)?;
        let owned = self.order.remove(&old)?;
        let slot = self.next_slot(count);
        self.order.insert(slot, owned);
        if let Some(entry) = self.slots.get_mut(key) {
            *entry = slot;
        }
        Some(old.count)
    }

    fn next_slot(&mut self, count: u64) -> FrequencySlot {
        let slot = FrequencySlot {
            count,
            seq: self.seq,
        };
        self.seq = self.seq.wrapping_add(1);
        slot
    }
}

impl<K> Default for FrequencyIndex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_index_orders_by_count() {
        let mut index = FrequencyIndex::new();
        index.insert("a", 5);
        index.insert("b", 2);
        index.insert("c", 9);

        assert_eq!(index.peek_min(), Some((&"b", 2)));
        let order: Vec<_> = index.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn frequency_index_ties_break_by_creation_order() {
        let mut index = FrequencyIndex::new();
        index.insert("a", 1);
        index.insert("b", 1);
        index.insert("c", 1);

        assert_eq!(index.peek_min(), Some((&"a", 1)));
        index.remove(&"a");
        assert_eq!(index.peek_min(), Some((&"b", 1)));
    }

    #[test]
    fn frequency_index_relocated_key_goes_behind_equal_counts() {
        let mut index = FrequencyIndex::new();
        index.insert("a", 1);
        index.insert("b", 2);
        index.increment(&"a");

        // both at 2, but "b" held that count first
        assert_eq!(index.peek_min(), Some((&"b", 2)));
    }

    #[test]
    fn frequency_index_insert_existing_returns_previous() {
        let mut index = FrequencyIndex::new();
        assert_eq!(index.insert("a", 3), None);
        assert_eq!(index.insert("a", 7), Some(3));
        assert_eq!(index.len(), 1);
        assert_eq!(index.count_of(&"a"), Some(7));
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_increment_missing_key() {
        let mut index: FrequencyIndex<&str> = FrequencyIndex::new();
        assert_eq!(index.increment(&"ghost"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn frequency_index_increment_saturates() {
        let mut index = FrequencyIndex::new();
        index.insert(1u32, u64::MAX);
        assert_eq!(index.increment(&1), Some(u64::MAX));
    }

    #[test]
    fn frequency_index_remove_returns_last_count() {
        let mut index = FrequencyIndex::new();
        index.insert("a", 4);
        assert_eq!(index.remove(&"a"), Some(4));
        assert_eq!(index.remove(&"a"), None);
        assert!(index.peek_min().is_none());
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_halve_all_floors_counts() {
        let mut index = FrequencyIndex::new();
        index.insert("a", 1);
        index.insert("b", 2);
        index.insert("c", 5);
        index.halve_all();

        assert_eq!(
            index.debug_snapshot(),
            vec![("a", 0), ("b", 1), ("c", 2)]
        );
        index.debug_validate_invariants();
    }

    #[test]
    fn frequency_index_halve_all_keeps_relative_order() {
        let mut index = FrequencyIndex::new();
        index.insert("x", 3);
        index.insert("y", 2);
        index.increment(&"y");
        // x(3) before y(3)
        index.halve_all();

        let order: Vec<_> = index.iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(order, vec![("x", 1), ("y", 1)]);
    }

    #[test]
    fn frequency_index_clear_resets() {
        let mut index = FrequencyIndex::with_capacity(8);
        index.insert("a", 1);
        index.insert("b", 1);
        index.clear();

        assert!(index.is_empty());
        assert!(!index.contains(&"a"));
        index.debug_validate_invariants();
    }
}
