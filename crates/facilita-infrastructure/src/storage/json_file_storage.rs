//! File-backed implementation of `KeyValueStorage`.

use super::atomic_file::AtomicFile;
use facilita_core::error::Result;
use facilita_core::storage::{KeyValueStorage, StorageKey};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each key as `<key>.json` inside one data directory.
///
/// ```text
/// data_dir/
/// ├── facilita_user.json
/// ├── facilita_services.json
/// ├── facilita_requests.json
/// └── ...
/// ```
///
/// Every write replaces the whole document atomically (see [`AtomicFile`]).
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    base_dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        tracing::debug!("Using data directory {:?}", base_dir);
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the file path for a given key.
    pub fn file_path(&self, key: StorageKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    fn file(&self, key: StorageKey) -> AtomicFile {
        AtomicFile::new(self.file_path(key))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.file(key).read()?)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        Ok(self.file(key).write(value)?)
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        Ok(self.file(key).remove()?)
    }
}
