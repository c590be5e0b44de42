//! Injectable diagnostic sinks for policy trace events.
//!
//! Policies report what they do to a [`DiagnosticSink`] owned by the policy
//! instance rather than to a process-wide logger, so every store can be
//! observed (or silenced) on its own.
//!
//! ## Key Components
//!
//! - [`PolicyEvent`]: borrowed event emitted by a policy.
//! - [`TracingSink`]: forwards events to `tracing` at TRACE level (default).
//! - [`NoopSink`]: drops everything.
//! - [`RecordingSink`]: keeps owned copies of every event; handy in tests.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use lfukit::diagnostics::{OwnedPolicyEvent, RecordingSink};
//! use lfukit::policy::lfu::LfuPolicy;
//! use lfukit::traits::EvictionPolicy;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let mut policy = LfuPolicy::with_sink(100, sink.clone());
//! policy.insert(&"a");
//!
//! assert_eq!(
//!     sink.events(),
//!     vec![
//!         OwnedPolicyEvent::Created { decay_border: 100 },
//!         OwnedPolicyEvent::Inserted { key: "a" },
//!         OwnedPolicyEvent::Incremented {
//!             key: "a",
//!             count: 2,
//!             decay_counter: 1,
//!         },
//!     ]
//! );
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

/// Trace event reported by an eviction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyEvent<'a, K> {
    /// A policy was constructed with the given decay border.
    Created { decay_border: u64 },
    /// A key started being tracked at the baseline count.
    Inserted { key: &'a K },
    /// A key stopped being tracked.
    Removed { key: &'a K },
    /// A key's count was bumped; `count` is the new value and
    /// `decay_counter` the usage events since the last decay, this one
    /// included.
    Incremented {
        key: &'a K,
        count: u64,
        decay_counter: u64,
    },
    /// Every tracked count was halved.
    Decayed { tracked: usize },
}

impl<K: Clone> PolicyEvent<'_, K> {
    /// Clones the borrowed key into an [`OwnedPolicyEvent`].
    pub fn to_owned_event(&self) -> OwnedPolicyEvent<K> {
        match *self {
            PolicyEvent::Created { decay_border } => OwnedPolicyEvent::Created { decay_border },
            PolicyEvent::Inserted { key } => OwnedPolicyEvent::Inserted { key: key.clone() },
            PolicyEvent::Removed { key } => OwnedPolicyEvent::Removed { key: key.clone() },
            PolicyEvent::Incremented {
                key,
                count,
                decay_counter,
            } => OwnedPolicyEvent::Incremented {
                key: key.clone(),
                count,
                decay_counter,
            },
            PolicyEvent::Decayed { tracked } => OwnedPolicyEvent::Decayed { tracked },
        }
    }
}

/// Owned counterpart of [`PolicyEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedPolicyEvent<K> {
    /// See [`PolicyEvent::Created`].
    Created { decay_border: u64 },
    /// See [`PolicyEvent::Inserted`].
    Inserted { key: K },
    /// See [`PolicyEvent::Removed`].
    Removed { key: K },
    /// See [`PolicyEvent::Incremented`].
    Incremented {
        key: K,
        count: u64,
        decay_counter: u64,
    },
    /// See [`PolicyEvent::Decayed`].
    Decayed { tracked: usize },
}

/// Receiver of policy trace events.
///
/// Sinks are shared behind an `Arc` and invoked while the owning store's
/// lock is held. A sink must not call back into that store.
pub trait DiagnosticSink<K>: Send + Sync {
    /// Records one event.
    fn record(&self, event: PolicyEvent<'_, K>);
}

/// Shared, type-erased sink handle as stored by policies.
pub type SharedSink<K> = Arc<dyn DiagnosticSink<K>>;

// ---------------------------------------------------------------------------
// TracingSink
// ---------------------------------------------------------------------------

/// Forwards events to the `tracing` facade at TRACE level.
///
/// Nothing is printed unless the host process installs a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl<K: Debug> DiagnosticSink<K> for TracingSink {
    fn record(&self, event: PolicyEvent<'_, K>) {
        match event {
            PolicyEvent::Created { decay_border } => {
                tracing::trace!(decay_border, "policy created");
            },
            PolicyEvent::Inserted { key } => {
                tracing::trace!(key = ?key, "key inserted");
            },
            PolicyEvent::Removed { key } => {
                tracing::trace!(key = ?key, "key removed");
            },
            PolicyEvent::Incremented {
                key,
                count,
                decay_counter,
            } => {
                tracing::trace!(key = ?key, count, decay_counter, "key incremented");
            },
            PolicyEvent::Decayed { tracked } => {
                tracing::trace!(tracked, "all elements decayed");
            },
        }
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl<K> DiagnosticSink<K> for NoopSink {
    #[inline]
    fn record(&self, _event: PolicyEvent<'_, K>) {}
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Keeps an owned copy of every event in arrival order.
#[derive(Debug)]
pub struct RecordingSink<K> {
    events: Mutex<Vec<OwnedPolicyEvent<K>>>,
}

impl<K> RecordingSink<K> {
    /// Creates a sink with nothing recorded.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<OwnedPolicyEvent<K>> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<K: Clone> RecordingSink<K> {
    /// Returns a copy of everything recorded so far.
    pub fn events(&self) -> Vec<OwnedPolicyEvent<K>> {
        self.events.lock().clone()
    }
}

impl<K> Default for RecordingSink<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Send> DiagnosticSink<K> for RecordingSink<K> {
    fn record(&self, event: PolicyEvent<'_, K>) {
        self.events.lock().push(event.to_owned_event());
    }
}
