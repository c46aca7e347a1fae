pub mod file;
pub mod memory;
pub mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{Annotation, PersistedFilters, PersistedSnapshot, SnapshotView};

use serde_json::Value;

/// Best-effort key-value persistence.
///
/// Neither method reports failure to the caller: a failed `save` is logged
/// and leaves the durable copy stale, a missing, unreadable or corrupt entry
/// loads as `None`.
pub trait PersistenceGateway: Send + Sync {
    fn save(&self, key: &str, value: &Value);

    fn load(&self, key: &str) -> Option<Value>;
}
