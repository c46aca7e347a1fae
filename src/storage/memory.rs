use super::PersistenceGateway;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// In-process gateway.
///
/// Entries are kept as serialized JSON text, the same way a browser-style
/// key-value store would hold them, so corrupt entries can be planted with
/// [`MemoryStorage::insert_raw`].
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `text` verbatim under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: &str, text: &str) {
        self.entries().insert(key.to_string(), text.to_string());
    }

    /// Serialized text currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    /// Number of successful `save` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PersistenceGateway for MemoryStorage {
    fn save(&self, key: &str, value: &Value) {
        match serde_json::to_string(value) {
            Ok(text) => {
                self.entries().insert(key.to_string(), text);
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
            Err(err) => warn!(key, error = %err, "failed to serialize state"),
        }
    }

    fn load(&self, key: &str) -> Option<Value> {
        let text = self.raw(key)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored state is not valid JSON");
                None
            }
        }
    }
}
