//! # Eviction Policy Traits
//!
//! This module defines the seam between a [`BoundedStore`](crate::store::BoundedStore)
//! and the policy that decides which key to give up when the store is full.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────┐
//!   │            EvictionPolicy<K>                 │
//!   │                                              │
//!   │  insert(&mut, &K)                            │
//!   │  remove(&mut, &K)    → Result<(), CacheError>│
//!   │  replace(&)          → Result<K, CacheError> │
//!   │  increment(&mut, &K) → Result<(), CacheError>│
//!   │  contains(&, &K)     → bool                  │
//!   │  len(&)              → usize                 │
//!   │  clear(&mut)                                 │
//!   └──────────────────────┬───────────────────────┘
//!                          │
//!                          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │            FrequencyPolicy<K>                │
//!   │                                              │
//!   │  frequency(&, &K)    → Option<u64>           │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! A policy owns no values. It sees keys and usage signals only; the store
//! keeps the payload and calls into the policy while holding its lock, so
//! policies need no synchronization of their own.
//!
//! ## Call Protocol
//!
//! | Store action            | Policy calls                               |
//! |-------------------------|--------------------------------------------|
//! | write, room left        | `insert(key)`                              |
//! | write, store full       | `replace()`, `remove(victim)`, `insert(key)` |
//! | read / items            | `increment(key)` per key                   |
//! | delete (strict mode)    | `remove(key)`                              |
//!
//! `replace` only nominates; it never removes. The caller must follow up
//! with `remove`.
//!
//! ## Example Usage
//!
//! ```
//! use std::collections::VecDeque;
//!
//! use lfukit::error::CacheError;
//! use lfukit::store::BoundedStore;
//! use lfukit::traits::EvictionPolicy;
//!
//! /// Evicts in first-tracked order, ignoring usage.
//! #[derive(Default)]
//! struct Fifo(VecDeque<u32>);
//!
//! impl EvictionPolicy<u32> for Fifo {
//!     fn insert(&mut self, key: &u32) {
//!         if !self.0.contains(key) {
//!             self.0.push_back(*key);
//!         }
//!     }
//!     fn remove(&mut self, key: &u32) -> Result<(), CacheError> {
//!         let pos = self.0.iter().position(|k| k == key).ok_or(CacheError::KeyNotFound)?;
//!         self.0.remove(pos);
//!         Ok(())
//!     }
//!     fn replace(&self) -> Result<u32, CacheError> {
//!         self.0.front().copied().ok_or(CacheError::EmptyPolicy)
//!     }
//!     fn increment(&mut self, key: &u32) -> Result<(), CacheError> {
//!         if self.0.contains(key) { Ok(()) } else { Err(CacheError::KeyNotFound) }
//!     }
//!     fn contains(&self, key: &u32) -> bool {
//!         self.0.contains(key)
//!     }
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn clear(&mut self) {
//!         self.0.clear();
//!     }
//! }
//!
//! let store = BoundedStore::new(2, Fifo::default());
//! store.write(1, "one");
//! store.write(2, "two");
//! store.read(&1).unwrap();
//! store.write(3, "three");
//! assert!(!store.contains(&1));
//! ```

use crate::error::CacheError;

/// Usage tracker and victim selector driven by a store.
///
/// # Contract
///
/// - `insert` on an untracked key starts tracking it; on a tracked key it
///   counts as one usage event. It never fails.
/// - `remove` and `increment` fail with [`CacheError::KeyNotFound`] for
///   untracked keys.
/// - `replace` fails with [`CacheError::EmptyPolicy`] when nothing is
///   tracked and otherwise names a tracked key without removing it.
pub trait EvictionPolicy<K> {
    /// Starts tracking `key`, or records a usage event if already tracked.
    fn insert(&mut self, key: &K);

    /// Stops tracking `key`.
    fn remove(&mut self, key: &K) -> Result<(), CacheError>;

    /// Nominates the next eviction victim.
    fn replace(&self) -> Result<K, CacheError>;

    /// Records a usage event for `key`.
    fn increment(&mut self, key: &K) -> Result<(), CacheError>;

    /// Returns `true` if `key` is tracked.
    fn contains(&self, key: &K) -> bool;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all tracking state.
    fn clear(&mut self);
}

/// Policies that expose a per-key usage count.
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::LfuPolicy;
/// use lfukit::traits::{EvictionPolicy, FrequencyPolicy};
///
/// let mut policy = LfuPolicy::new(100);
/// policy.insert(&"k");
/// assert_eq!(policy.frequency(&"k"), Some(2));
/// assert_eq!(policy.frequency(&"other"), None);
/// ```
pub trait FrequencyPolicy<K>: EvictionPolicy<K> {
    /// Current count for `key`, or `None` if untracked.
    fn frequency(&self, key: &K) -> Option<u64>;
}
