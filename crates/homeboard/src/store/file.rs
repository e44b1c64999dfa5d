//! JSON-file store backend.
//!
//! The whole store is a single JSON object `{ "key": "value", ... }`. It is
//! read once at open time and rewritten after every mutation using
//! temp-file-then-rename, so a crash mid-write leaves the previous file in
//! place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};

/// Store persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write. A file that is not a JSON string map is logged and treated as
    /// empty, and is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file is not valid JSON, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no store file yet");
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Writes `entries` atomically: temp file, fsync, rename.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Encode {
            key: "*",
            message: e.to_string(),
        })?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{timestamp}"));

        let written = fs::write(&temp_path, json)
            .and_then(|()| fs::File::open(&temp_path)?.sync_all())
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                debug!(path = %temp_path.display(), error = %cleanup, "no temp file to clean up");
            }
            return Err(write_err(e));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
