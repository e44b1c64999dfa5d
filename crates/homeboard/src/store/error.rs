//! Error types for the persistent key-value store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by store backends and the typed store facade.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read.
    #[error("Failed to read store file: {path}")]
    Read {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be written or replaced.
    #[error("Failed to write store file: {path}")]
    Write {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("Failed to encode value for key '{key}': {message}")]
    Encode {
        /// Store key being written.
        key: &'static str,
        /// Encoder message.
        message: String,
    },

    /// A stored value exists but does not decode to the expected shape.
    #[error("Stored value for key '{key}' is corrupt: {message}")]
    Corrupt {
        /// Store key being read.
        key: &'static str,
        /// Decoder message.
        message: String,
    },
}

impl StoreError {
    /// Returns `true` for [`StoreError::Corrupt`].
    ///
    /// Controllers treat corrupt entries as absent and fall back to defaults;
    /// every other variant is a backend failure.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_write_error_includes_path() {
        let err = StoreError::Write {
            path: PathBuf::from("/tmp/store.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/store.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_corrupt_names_key() {
        let err = StoreError::Corrupt {
            key: "todos",
            message: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'todos'"));
        assert!(msg.contains("line 1"));
        assert!(err.is_corrupt());
    }

    #[test]
    fn backend_errors_are_not_corrupt() {
        let err = StoreError::Read {
            path: PathBuf::from("/x"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        };
        assert!(!err.is_corrupt());
    }
}
