//! lfukit: a bounded, thread-safe key/value store with a pluggable eviction
//! policy and a decaying LFU policy as the default.
//!
//! ## Layout
//!
//! ```text
//!   builder ──► store::BoundedStore ──► traits::EvictionPolicy
//!                    │                        ▲
//!                    │                        │
//!                    ▼                  policy::LfuPolicy ──► ds::FrequencyIndex
//!               store::StoreMetrics           │
//!                                             ▼
//!                                  diagnostics::DiagnosticSink
//! ```
//!
//! ## Example
//!
//! ```
//! use lfukit::prelude::*;
//!
//! let store: LfuStore<&str, u32> = StoreBuilder::new().max_size(2).build();
//! store.write("a", 1);
//! store.write("b", 2);
//! store.read(&"b").unwrap();
//! store.write("c", 3);
//!
//! assert!(!store.contains(&"a"));
//! assert_eq!(store.items().unwrap().len(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;
