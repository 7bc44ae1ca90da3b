//! Durable local storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key namespace: every sheet is stored under `"{namespace}:{slug}"`.
fn default_namespace() -> String {
    String::from("question-sheet")
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory holding one file per key. Empty means the platform data dir.
    #[serde(default)]
    pub dir: String,

    /// When false, storage behaves as absent: reads miss, writes are dropped.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            dir: String::new(),
            enabled: default_enabled(),
        }
    }
}

impl StorageConfig {
    /// Resolve the storage directory.
    ///
    /// Returns the explicit `dir` if set, otherwise `{data_dir}/qsheet`.
    /// `None` when no directory can be determined (e.g. no home directory).
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if !self.dir.is_empty() {
            return Some(PathBuf::from(&self.dir));
        }
        dirs::data_dir().map(|p| p.join("qsheet"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/qsheet-test".into(),
            ..StorageConfig::default()
        };
        assert_eq!(config.resolved_dir(), Some(PathBuf::from("/tmp/qsheet-test")));
    }

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert_eq!(config.namespace, "question-sheet");
        assert!(config.enabled);
        assert!(config.dir.is_empty());
    }
}
