//! File-backed key-value store
//!
//! All keys live in one JSON object on disk. Every `set` rewrites the file, so
//! values survive process restarts.

use super::KeyValueStore;
use crate::constants::KV_FILE_NAME;
use crate::error::Result;
use crate::helpers::{get_or_create_data_dir, write_atomic};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value store persisted as a JSON object
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open the store at `path`; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store in the platform data directory
    pub fn open_default() -> Result<Self> {
        let path = get_or_create_data_dir()?.join(KV_FILE_NAME);
        tracing::debug!(path = ?path, "Opening local storage");
        Ok(Self::open(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, &content)
    }
}
