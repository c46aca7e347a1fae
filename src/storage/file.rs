//! Directory-backed key-value persistence, one JSON document per key.

use super::PersistenceGateway;
use crate::core::{DeckError, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) the storage directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            DeckError::StorageError(format!(
                "Failed to create storage directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(DeckError::StorageError(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Writes `value` under `key` via a temp file and rename.
    pub fn try_save(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(value)
            .map_err(|e| DeckError::StorageError(format!("Failed to serialize state: {}", e)))?;

        let temp_file = File::create(&temp_path).map_err(|e| {
            DeckError::StorageError(format!("Failed to create temp file '{}': {}", temp_path.display(), e))
        })?;
        let mut writer = BufWriter::new(temp_file);
        writer
            .write_all(&bytes)
            .map_err(|e| DeckError::StorageError(format!("Failed to write state: {}", e)))?;
        writer
            .flush()
            .map_err(|e| DeckError::StorageError(format!("Failed to flush state: {}", e)))?;
        writer
            .get_mut()
            .sync_all()
            .map_err(|e| DeckError::StorageError(format!("Failed to sync state: {}", e)))?;

        fs::rename(&temp_path, &path).map_err(|e| {
            DeckError::StorageError(format!(
                "Failed to rename temp file '{}' -> '{}': {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Reads the value under `key`; `Ok(None)` when nothing was saved yet.
    pub fn try_load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path).map_err(|e| {
            DeckError::StorageError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let value = serde_json::from_slice(&data).map_err(|e| {
            DeckError::SnapshotError(format!("'{}' is not valid JSON: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }
}

impl PersistenceGateway for FileStorage {
    fn save(&self, key: &str, value: &Value) {
        if let Err(err) = self.try_save(key, value) {
            warn!(key, error = %err, "failed to persist state");
        }
    }

    fn load(&self, key: &str) -> Option<Value> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to load persisted state");
                None
            }
        }
    }
}
