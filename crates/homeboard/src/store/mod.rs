//! Persistent key-value storage for widget state.
//!
//! Widgets persist through the [`KeyValueStore`] trait, a string-to-string
//! map with get/set/remove. Two backends exist:
//!
//! - [`MemoryStore`]: process-local map, used by tests.
//! - [`FileStore`]: JSON object on disk, rewritten atomically on every change.
//!
//! Controllers never touch raw keys; they go through [`DashboardStore`],
//! which owns the key names and the JSON encoding of each entity.

mod error;
mod file;
mod typed;

pub use error::StoreError;
pub use file::FileStore;
pub use typed::{keys, DashboardStore};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Durable string storage keyed by string.
///
/// Methods take `&self`; backends use interior mutability so one store can
/// be shared by every controller and by deferred write tasks.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a controller wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}
