//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by store and policy operations that address a
//!   key the structure does not hold, or that need at least one entry.
//! - [`ConfigError`]: Returned when store configuration parameters are
//!   invalid (e.g. zero capacity).
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::{CacheError, ConfigError};
//! use lfukit::store::LfuStore;
//!
//! let store: LfuStore<u64, String> = LfuStore::with_capacity(4, 100);
//! assert_eq!(store.read(&7).unwrap_err(), CacheError::KeyNotFound);
//! assert_eq!(store.items().unwrap_err(), CacheError::EmptyCache);
//!
//! let bad = LfuStore::<u64, String>::try_with_capacity(0, 100);
//! let err: ConfigError = bad.unwrap_err();
//! assert!(err.message().contains("max_size"));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Failure of a single store or policy operation.
///
/// All variants are synchronous and terminal for the call that produced them;
/// nothing is retried or repaired in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CacheError {
    /// The key is absent from the store, or not tracked by the policy.
    #[error("key not found")]
    KeyNotFound,
    /// The policy was asked for a victim while tracking no keys.
    #[error("no key registered in eviction policy")]
    EmptyPolicy,
    /// A whole-store operation was invoked on an empty store.
    #[error("empty cache")]
    EmptyCache,
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when store configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`StoreBuilder::try_build`](crate::builder::StoreBuilder::try_build) and
/// [`BoundedStore::try_new`](crate::store::BoundedStore::try_new). Carries a
/// human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use lfukit::builder::StoreBuilder;
///
/// let err = StoreBuilder::new().max_size(0).try_build::<u64, u64>().unwrap_err();
/// assert!(err.to_string().contains("max_size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
