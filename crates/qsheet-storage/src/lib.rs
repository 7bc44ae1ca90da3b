//! # qsheet-storage
//!
//! Durable local key-value store for serialized sheets.
//!
//! Values are strings; one key per sheet, `"{namespace}:{slug}"`. Three backends:
//! - **file**: one file per key under a directory, written atomically
//!   (temp file + rename)
//! - **memory**: process-local map, for tests and embedding
//! - **unavailable**: no storage facility at all; reads miss and writes
//!   succeed without effect, so callers never have to special-case it

mod error;

pub use error::StorageError;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use qsheet_config::StorageConfig;

/// Build the storage key for a sheet.
#[must_use]
pub fn storage_key(namespace: &str, slug: &str) -> String {
    format!("{namespace}:{slug}")
}

#[derive(Debug)]
enum Backend {
    File { dir: PathBuf },
    Memory(Mutex<HashMap<String, String>>),
    Unavailable,
}

/// String-valued key-value store backing the local sheet copy.
#[derive(Debug)]
pub struct LocalStore {
    backend: Backend,
}

impl LocalStore {
    /// File-backed store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File { dir: dir.into() },
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// A store for environments without any storage facility.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            backend: Backend::Unavailable,
        }
    }

    /// Build a store from configuration.
    ///
    /// Disabled storage, or no resolvable directory, yields [`LocalStore::unavailable`].
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        if !config.enabled {
            return Self::unavailable();
        }
        match config.resolved_dir() {
            Some(dir) => Self::file(dir),
            None => {
                tracing::warn!("no data directory available; local storage disabled");
                Self::unavailable()
            }
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self.backend, Backend::Unavailable)
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing file exists but cannot be read.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::File { dir } => {
                let path = key_path(dir, key);
                match std::fs::read_to_string(&path) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(StorageError::io(path, e)),
                }
            }
            Backend::Memory(map) => Ok(map
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(key)
                .cloned()),
            Backend::Unavailable => Ok(None),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory or file cannot be written.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::File { dir } => write_atomic(dir, &key_path(dir, key), value),
            Backend::Memory(map) => {
                map.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key.to_string(), value.to_string());
                Ok(())
            }
            Backend::Unavailable => Ok(()),
        }
    }

    /// Remove `key`. Returns whether a value was present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be deleted.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        match &self.backend {
            Backend::File { dir } => {
                let path = key_path(dir, key);
                match std::fs::remove_file(&path) {
                    Ok(()) => Ok(true),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                    Err(e) => Err(StorageError::io(path, e)),
                }
            }
            Backend::Memory(map) => Ok(map
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(key)
                .is_some()),
            Backend::Unavailable => Ok(false),
        }
    }
}

/// File name for a key: percent-encoded so `:` and `/` stay inside the directory.
fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", urlencoding::encode(key)))
}

fn write_atomic(dir: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    tmp.write_all(value.as_bytes())
        .map_err(|e| StorageError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;
    tracing::debug!(path = %path.display(), bytes = value.len(), "stored value");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn file_store() -> (tempfile::TempDir, LocalStore) {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = LocalStore::file(tmp.path().join("sheets"));
        (tmp, store)
    }

    fn exercise_cycle(store: &LocalStore) {
        assert_eq!(store.get("ns:a").unwrap(), None);
        store.set("ns:a", "{\"v\":1}").unwrap();
        store.set("ns:a", "{\"v\":2}").unwrap();
        assert_eq!(store.get("ns:a").unwrap().as_deref(), Some("{\"v\":2}"));
        assert!(store.remove("ns:a").unwrap());
        assert!(!store.remove("ns:a").unwrap());
        assert_eq!(store.get("ns:a").unwrap(), None);
    }

    #[test]
    fn memory_set_get_remove_cycle() {
        exercise_cycle(&LocalStore::in_memory());
    }

    #[test]
    fn file_set_get_remove_cycle() {
        let (_tmp, store) = file_store();
        exercise_cycle(&store);
    }

    #[rstest]
    #[case("sde", "question-sheet:sde")]
    #[case("blind-75", "question-sheet:blind-75")]
    #[case("", "question-sheet:")]
    fn key_format(#[case] slug: &str, #[case] expected: &str) {
        assert_eq!(storage_key("question-sheet", slug), expected);
    }

    #[test]
    fn keys_are_isolated_per_slug() {
        let (_tmp, store) = file_store();
        store.set("ns:one", "1").unwrap();
        store.set("ns:two", "2").unwrap();
        store.remove("ns:one").unwrap();
        assert_eq!(store.get("ns:two").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_names_are_encoded() {
        let (tmp, store) = file_store();
        store.set("ns:a/b", "x").unwrap();
        let path = tmp.path().join("sheets").join("ns%3Aa%2Fb.json");
        assert!(path.exists(), "expected {}", path.display());
    }

    #[test]
    fn unavailable_store_is_a_silent_noop() {
        let store = LocalStore::unavailable();
        assert!(!store.is_available());
        store.set("ns:a", "x").unwrap();
        assert_eq!(store.get("ns:a").unwrap(), None);
        assert!(!store.remove("ns:a").unwrap());
    }

    #[test]
    fn disabled_config_yields_unavailable() {
        let config = StorageConfig {
            enabled: false,
            ..StorageConfig::default()
        };
        assert!(!LocalStore::from_config(&config).is_available());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let (tmp, store) = file_store();
        // A directory where the value file should be.
        std::fs::create_dir_all(tmp.path().join("sheets").join("ns%3Ax.json")).unwrap();
        assert!(matches!(store.get("ns:x"), Err(StorageError::Io { .. })));
    }
}
