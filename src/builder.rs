//! Builder for LFU stores.
//!
//! Collects a [`StoreConfig`] step by step and hands it to the
//! [`LfuStore`] constructors, so callers never spell out the policy type.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::StoreBuilder;
//! use lfukit::config::DeleteMode;
//!
//! let store = StoreBuilder::new()
//!     .max_size(100)
//!     .decay_border(500)
//!     .delete_mode(DeleteMode::Strict)
//!     .build::<u64, String>();
//!
//! store.write(1, "hello".to_string());
//! assert_eq!(*store.read(&1).unwrap(), "hello");
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::config::{DeleteMode, StoreConfig};
use crate::diagnostics::SharedSink;
use crate::error::ConfigError;
use crate::store::LfuStore;

/// Builder for [`LfuStore`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Starts from [`StoreConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Maximum number of stored entries. Must be greater than zero.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Usage events between two decays of the LFU counts.
    pub fn decay_border(mut self, decay_border: u64) -> Self {
        self.config.decay_border = decay_border;
        self
    }

    /// Whether delete also untracks the key. Defaults to
    /// [`DeleteMode::Lazy`].
    pub fn delete_mode(mut self, delete_mode: DeleteMode) -> Self {
        self.config.delete_mode = delete_mode;
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Builds the store, reporting policy events through `tracing`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See
    /// [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LfuStore<K, V>
    where
        K: Eq + Hash + Clone + Debug,
    {
        match self.try_build() {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the store, returning an error on invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lfukit::builder::StoreBuilder;
    ///
    /// assert!(StoreBuilder::new().max_size(0).try_build::<u64, u64>().is_err());
    /// assert!(StoreBuilder::new().max_size(1).try_build::<u64, u64>().is_ok());
    /// ```
    pub fn try_build<K, V>(self) -> Result<LfuStore<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Debug,
    {
        LfuStore::try_from_config(self.config)
    }

    /// Builds the store with a custom diagnostic sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use lfukit::builder::StoreBuilder;
    /// use lfukit::diagnostics::RecordingSink;
    ///
    /// let sink: Arc<RecordingSink<u32>> = Arc::new(RecordingSink::new());
    /// let store = StoreBuilder::new()
    ///     .max_size(4)
    ///     .try_build_with_sink::<u32, u32>(sink.clone())
    ///     .unwrap();
    ///
    /// store.write(1, 1);
    /// // Created, Inserted, Incremented
    /// assert_eq!(sink.len(), 3);
    /// ```
    pub fn try_build_with_sink<K, V>(
        self,
        sink: SharedSink<K>,
    ) -> Result<LfuStore<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LfuStore::try_from_config_with_sink(self.config, sink)
    }
}
