pub use crate::builder::StoreBuilder;
pub use crate::config::{DeleteMode, StoreConfig};
pub use crate::diagnostics::{
    DiagnosticSink, NoopSink, OwnedPolicyEvent, PolicyEvent, RecordingSink, SharedSink,
    TracingSink,
};
pub use crate::error::{CacheError, ConfigError};
pub use crate::policy::lfu::LfuPolicy;
pub use crate::store::{BoundedStore, LfuStore, StoreMetrics};
pub use crate::traits::{EvictionPolicy, FrequencyPolicy};
