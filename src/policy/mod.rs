//! Eviction policies.

pub mod lfu;

pub use lfu::LfuPolicy;
