//! # Blob Backends
//!
//! [`Store`] reads and writes raw JSON text under a [`StoreKey`]. Typed
//! access and corruption handling live in [`crate::blob`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::keys::StoreKey;

/// Key-value storage for the persisted blobs.
pub trait Store {
    /// Raw JSON text under `key`, or `None` if absent.
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError>;

    /// Delete every key.
    fn clear(&mut self) -> Result<(), StoreError> {
        for key in StoreKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Human-readable name for this backend (for logging).
    fn backend_name(&self) -> &str;
}

// ─── FileStore ──────────────────────────────────────────────────────────

/// One `<key>.json` file per blob inside a data directory.
///
/// Writes land in a hidden temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "file store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    fn temp_path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key.as_str()))
    }
}

impl Store for FileStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let tmp = self.temp_path_for(key);
        let path = self.path_for(key);
        std::fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn backend_name(&self) -> &str {
        "FileStore"
    }
}

// ─── MemoryStore ────────────────────────────────────────────────────────

/// Blobs held in a map. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<StoreKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(&key).cloned())
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.blobs.remove(&key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "MemoryStore"
    }
}
