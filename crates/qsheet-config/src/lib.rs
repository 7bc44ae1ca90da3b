//! # qsheet-config
//!
//! Layered configuration loading for qsheet using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QSHEET_*` prefix, `__` as separator)
//! 2. Project-level `.qsheet/config.toml`
//! 3. User-level `~/.config/qsheet/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QSHEET_REMOTE__BASE_URL` -> `remote.base_url`,
//! `QSHEET_STORAGE__DIR` -> `storage.dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use qsheet_config::SheetConfig;
//!
//! let config = SheetConfig::load_with_dotenv().expect("config");
//! if config.remote.is_configured() {
//!     println!("Remote: {}", config.remote.base_url());
//! }
//! ```

mod error;
mod general;
mod remote;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use remote::RemoteConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SheetConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".qsheet/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QSHEET_").split("__"))
    }

    /// Reject values that would make the store unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.namespace".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.storage.namespace.contains(':') {
            return Err(ConfigError::InvalidValue {
                field: "storage.namespace".into(),
                reason: "must not contain ':'".into(),
            });
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.default_slug.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.default_slug".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qsheet").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SheetConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.remote.is_configured());
        assert_eq!(config.storage.namespace, "question-sheet");
    }

    #[test]
    fn figment_builds_without_files() {
        let config: SheetConfig = SheetConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.undo_ttl_secs, 5);
    }

    #[test]
    fn namespace_with_separator_is_rejected() {
        let mut config = SheetConfig::default();
        config.storage.namespace = "a:b".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "storage.namespace"
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = SheetConfig::default();
        config.remote.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
