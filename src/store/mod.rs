//! Bounded key/value storage driven by an eviction policy.
//!
//! The store owns the values; the policy owns usage order. One exclusive lock
//! guards both, so a policy never needs its own synchronization.

pub mod bounded;
pub mod metrics;

pub use bounded::{BoundedStore, LfuStore};
pub use metrics::StoreMetrics;
