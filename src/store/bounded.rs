//! Bounded, lock-guarded store.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                       BoundedStore<K, V, P>                              │
//!   │                                                                          │
//!   │   Mutex<StoreState>  (parking_lot, exclusive, non-reentrant)             │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  data:     FxHashMap<K, Arc<V>>   (authoritative payload)          │ │
//!   │   │  policy:   P: EvictionPolicy<K>   (usage order, no values)         │ │
//!   │   │  counters: StoreCounters                                           │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   max_size:    usize                                                     │
//!   │   delete_mode: DeleteMode                                                │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Flow
//!
//! ```text
//!   write(key, value)
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ data.len() >= max_size ?   (size only; key presence is not checked)    │
//!   │                                                                        │
//!   │   YES → victim = policy.replace()                                      │
//!   │         policy.remove(victim)                                          │
//!   │         data.remove(victim)  ── was absent? (lazily deleted)           │
//!   │                                  └─ ask for the next victim            │
//!   │   NO  → continue                                                       │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   policy.insert(key)      ← every write is a usage event
//!   data[key] = value       ← overwrites if present
//! ```
//!
//! Because the capacity check looks at size only, writing a key that is
//! already present while the store is full still evicts one entry. That
//! entry may be the written key itself, which is then tracked again from the
//! baseline.
//!
//! ## Core Operations
//!
//! | Method          | Fails with    | Policy effect                      |
//! |-----------------|---------------|------------------------------------|
//! | `write(k, v)`   | never         | `insert(k)`, maybe evict one       |
//! | `read(&k)`      | `KeyNotFound` | `increment(k)`                     |
//! | `read_with`     | `KeyNotFound` | `increment(k)`                     |
//! | `contains(&k)`  | never         | none                               |
//! | `items()`       | `EmptyCache`  | `increment` for every stored key   |
//! | `delete(&k)`    | never         | none (lazy) / `remove(k)` (strict) |
//!
//! ## Thread Safety
//!
//! - Every public method holds the lock for its whole duration
//! - `read` hands out `Arc<V>`, never a reference into the map, so a value
//!   stays valid after a concurrent write, delete or eviction of its key
//! - `read_with` and `with_policy` run the closure under the lock. Calling
//!   back into the same store from inside the closure deadlocks
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::store::LfuStore;
//!
//! let store: LfuStore<&str, u32> = LfuStore::with_capacity(2, 100);
//! store.write("a", 1);
//! store.write("b", 2);
//! store.write("c", 3); // "a" and "b" tie at 2; "a" was first → evicted
//!
//! assert!(!store.contains(&"a"));
//! assert_eq!(*store.read(&"b").unwrap(), 2);
//! assert_eq!(store.frequency(&"b"), Some(3));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::{DeleteMode, StoreConfig};
use crate::diagnostics::SharedSink;
use crate::error::{CacheError, ConfigError};
use crate::policy::lfu::LfuPolicy;
use crate::store::metrics::{StoreCounters, StoreMetrics};
use crate::traits::{EvictionPolicy, FrequencyPolicy};

/// Store driven by the default decaying LFU policy.
pub type LfuStore<K, V> = BoundedStore<K, V, LfuPolicy<K>>;

struct StoreState<K, V, P> {
    data: FxHashMap<K, Arc<V>>,
    policy: P,
    counters: StoreCounters,
}

impl<K, V, P> StoreState<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K>,
{
    /// Drops one stored entry chosen by the policy.
    ///
    /// Victims that are tracked but no longer stored are untracked and
    /// skipped until a stored entry goes or the policy runs dry.
    fn evict_one(&mut self) {
        while let Ok(victim) = self.policy.replace() {
            if self.policy.remove(&victim).is_err() {
                break;
            }
            if self.data.remove(&victim).is_some() {
                self.counters.inc_eviction();
                return;
            }
            self.counters.inc_stale_skip();
        }
    }

    fn lookup(&mut self, key: &K) -> Result<Arc<V>, CacheError> {
        let Some(value) = self.data.get(key).cloned() else {
            self.counters.inc_miss();
            return Err(CacheError::KeyNotFound);
        };
        self.policy.increment(key)?;
        self.counters.inc_hit();
        Ok(value)
    }
}

/// Bounded key/value store with a pluggable eviction policy.
///
/// See module-level documentation for details.
pub struct BoundedStore<K, V, P = LfuPolicy<K>> {
    state: Mutex<StoreState<K, V, P>>,
    max_size: usize,
    delete_mode: DeleteMode,
}

impl<K, V, P> BoundedStore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K>,
{
    /// Creates a store holding at most `max_size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero. See [`try_new`](Self::try_new).
    pub fn new(max_size: usize, policy: P) -> Self {
        match Self::try_new(max_size, policy) {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a store, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    pub fn try_new(max_size: usize, policy: P) -> Result<Self, ConfigError> {
        let config = StoreConfig {
            max_size,
            ..StoreConfig::default()
        };
        Self::try_with_config(config, policy)
    }

    /// Creates a store from `config` around an already built policy.
    ///
    /// `config.decay_border` is not applied here; it only configures the
    /// LFU policy built by [`LfuStore`] constructors and the builder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_with_config(config: StoreConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(StoreState {
                data: FxHashMap::default(),
                policy,
                counters: StoreCounters::default(),
            }),
            max_size: config.max_size,
            delete_mode: config.delete_mode,
        })
    }

    /// Stores `value` under `key`, evicting one entry first if the store is
    /// full. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::store::LfuStore;
    ///
    /// let store: LfuStore<u32, &str> = LfuStore::with_capacity(1, 100);
    /// store.write(1, "one");
    /// store.write(2, "two");
    /// assert_eq!(store.len(), 1);
    /// assert!(store.contains(&2));
    /// ```
    pub fn write(&self, key: K, value: V) {
        self.write_arc(key, Arc::new(value));
    }

    /// Stores an already shared value.
    pub fn write_arc(&self, key: K, value: Arc<V>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.data.len() >= self.max_size {
            state.evict_one();
        }
        state.policy.insert(&key);
        if state.data.insert(key, value).is_some() {
            state.counters.inc_update();
        } else {
            state.counters.inc_insert();
        }
    }

    /// Returns a shared handle to the value for `key` and records a usage
    /// event.
    ///
    /// The handle stays valid after the key is overwritten, deleted or
    /// evicted; it then refers to the old value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is not stored.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::error::CacheError;
    /// use lfukit::store::LfuStore;
    ///
    /// let store: LfuStore<u32, String> = LfuStore::with_capacity(4, 100);
    /// store.write(1, "one".to_string());
    ///
    /// let value = store.read(&1).unwrap();
    /// store.delete(&1);
    /// assert_eq!(*value, "one");
    /// assert_eq!(store.read(&1).unwrap_err(), CacheError::KeyNotFound);
    /// ```
    pub fn read(&self, key: &K) -> Result<Arc<V>, CacheError> {
        self.state.lock().lookup(key)
    }

    /// Runs `f` on the value for `key` while the lock is held.
    ///
    /// Same policy effect as [`read`](Self::read). `f` must not call back
    /// into this store.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is not stored.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::store::LfuStore;
    ///
    /// let store: LfuStore<u32, Vec<u8>> = LfuStore::with_capacity(4, 100);
    /// store.write(1, vec![1, 2, 3]);
    /// assert_eq!(store.read_with(&1, |bytes| bytes.len()), Ok(3));
    /// ```
    pub fn read_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Result<R, CacheError> {
        let mut guard = self.state.lock();
        let value = guard.lookup(key)?;
        Ok(f(&value))
    }

    /// Returns `true` if `key` is stored. Does not touch the policy.
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().data.contains_key(key)
    }

    /// Returns a snapshot of every stored entry after recording one usage
    /// event per stored key.
    ///
    /// Stored keys the policy does not track are returned without a usage
    /// event.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::EmptyCache`] if nothing is stored.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::store::LfuStore;
    ///
    /// let store: LfuStore<&str, u32> = LfuStore::with_capacity(4, 100);
    /// store.write("a", 1);
    /// store.write("b", 2);
    ///
    /// let items = store.items().unwrap();
    /// assert_eq!(items.len(), 2);
    /// assert_eq!(*items[&"a"], 1);
    /// assert_eq!(store.frequency(&"a"), Some(3));
    /// ```
    pub fn items(&self) -> Result<HashMap<K, Arc<V>>, CacheError> {
        let mut guard = self.state.lock();
        let StoreState { data, policy, .. } = &mut *guard;
        if data.is_empty() {
            return Err(CacheError::EmptyCache);
        }
        for key in data.keys() {
            // untracked keys have no count to bump
            let _ = policy.increment(key);
        }
        Ok(data
            .iter()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
            .collect())
    }

    /// Removes `key` if stored. Never fails.
    ///
    /// With [`DeleteMode::Lazy`] the policy keeps tracking the key; with
    /// [`DeleteMode::Strict`] the key is untracked as well.
    pub fn delete(&self, key: &K) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.data.remove(key).is_none() {
            return;
        }
        state.counters.inc_delete();
        if self.delete_mode == DeleteMode::Strict {
            // untracked keys have nothing to drop
            let _ = state.policy.remove(key);
        }
    }

    /// Removes every entry and all policy tracking.
    pub fn clear(&self) {
        let mut guard = self.state.lock();
        guard.data.clear();
        guard.policy.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.state.lock().data.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.state.lock().data.is_empty()
    }

    /// Number of keys tracked by the policy.
    ///
    /// Exceeds [`len`](Self::len) after lazy deletes.
    pub fn tracked_len(&self) -> usize {
        self.state.lock().policy.len()
    }

    /// Maximum number of stored entries.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether [`delete`](Self::delete) also untracks the key.
    #[inline]
    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    /// Snapshot of the store counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.state.lock().counters.snapshot()
    }

    /// Runs `f` against the policy while the lock is held.
    ///
    /// `f` must not call back into this store.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::store::LfuStore;
    ///
    /// let store: LfuStore<u32, u32> = LfuStore::with_capacity(4, 100);
    /// store.write(1, 10);
    /// assert_eq!(store.with_policy(|policy| policy.decay_counter()), 1);
    /// ```
    pub fn with_policy<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.state.lock().policy)
    }
}

impl<K, V, P> BoundedStore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: FrequencyPolicy<K>,
{
    /// Current policy count for `key`.
    ///
    /// Still answers for lazily deleted keys the policy tracks.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.state.lock().policy.frequency(key)
    }
}

impl<K, V> BoundedStore<K, V, LfuPolicy<K>>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an LFU store that reports policy events through `tracing`.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero. See
    /// [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(max_size: usize, decay_border: u64) -> Self {
        match Self::try_with_capacity(max_size, decay_border) {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an LFU store, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    pub fn try_with_capacity(max_size: usize, decay_border: u64) -> Result<Self, ConfigError> {
        Self::try_from_config(StoreConfig {
            max_size,
            decay_border,
            ..StoreConfig::default()
        })
    }

    /// Creates an LFU store from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_from_config(config: StoreConfig) -> Result<Self, ConfigError> {
        Self::try_with_config(config, LfuPolicy::new(config.decay_border))
    }
}

impl<K, V> BoundedStore<K, V, LfuPolicy<K>>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU store whose policy reports to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn try_from_config_with_sink(
        config: StoreConfig,
        sink: SharedSink<K>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_config(
            config,
            LfuPolicy::with_shared_sink(config.decay_border, sink),
        )
    }
}

impl<K, V> Default for BoundedStore<K, V, LfuPolicy<K>>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an LFU store with the default configuration (50 entries,
    /// decay every 100 usage events).
    fn default() -> Self {
        Self::with_capacity(
            StoreConfig::default().max_size,
            StoreConfig::default().decay_border,
        )
    }
}

impl<K, V, P> fmt::Debug for BoundedStore<K, V, P>
where
    P: EvictionPolicy<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BoundedStore")
            .field("len", &state.data.len())
            .field("tracked", &state.policy.len())
            .field("max_size", &self.max_size)
            .field("delete_mode", &self.delete_mode)
            .finish_non_exhaustive()
    }
}
