//! Store configuration.
//!
//! | Field          | Type         | Default | Description                          |
//! |----------------|--------------|---------|--------------------------------------|
//! | `max_size`     | `usize`      | 50      | Maximum entries held by the store    |
//! | `decay_border` | `u64`        | 100     | LFU usage events between two decays  |
//! | `delete_mode`  | `DeleteMode` | `Lazy`  | Whether delete also untracks the key |

use crate::error::ConfigError;
use crate::policy::lfu::DEFAULT_DECAY_BORDER;

/// Maximum entries when nothing else is configured.
pub const DEFAULT_MAX_SIZE: usize = 50;

/// How [`BoundedStore::delete`](crate::store::BoundedStore::delete) treats
/// the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeleteMode {
    /// Remove the value only. The policy keeps the key's count, so writing
    /// the key again resumes from where it left off, and the stale key may
    /// later be nominated as a victim (the store then skips it).
    #[default]
    Lazy,
    /// Remove the value and untrack the key. Writing it again starts over
    /// at the baseline count.
    Strict,
}

/// Parameters for building a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of stored entries; must be greater than zero.
    pub max_size: usize,
    /// LFU usage events between two decays.
    pub decay_border: u64,
    /// Whether delete also untracks the key.
    pub delete_mode: DeleteMode,
}

impl StoreConfig {
    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            decay_border: DEFAULT_DECAY_BORDER,
            delete_mode: DeleteMode::default(),
        }
    }
}
