//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use qsheet_config::SheetConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
base_url = "http://127.0.0.1:8080/sheets/"
timeout_secs = 3
enabled = false

[storage]
namespace = "study"
dir = "./cache"

[general]
default_slug = "blind-75"
undo_ttl_secs = 8
"#,
        )?;

        let config: SheetConfig = Figment::from(Serialized::defaults(SheetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.remote.base_url(), "http://127.0.0.1:8080/sheets");
        assert_eq!(config.remote.timeout_secs, 3);
        assert!(!config.remote.is_configured());
        assert_eq!(config.storage.namespace, "study");
        assert_eq!(config.storage.dir, "./cache");
        assert_eq!(config.general.default_slug, "blind-75");
        assert_eq!(config.general.undo_ttl_secs, 8);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\nundo_ttl_secs = 2\n")?;

        let config: SheetConfig = Figment::from(Serialized::defaults(SheetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.undo_ttl_secs, 2);
        assert_eq!(config.general.default_slug, "striver-sde-sheet");
        assert_eq!(config.storage.namespace, "question-sheet");
        assert!(config.remote.is_configured());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[storage]\nnamespace = \"from-toml\"\n")?;
        jail.set_env("QSHEET_STORAGE__NAMESPACE", "from-env");
        jail.set_env("QSHEET_REMOTE__TIMEOUT_SECS", "42");

        let config: SheetConfig = Figment::from(Serialized::defaults(SheetConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("QSHEET_").split("__"))
            .extract()?;

        assert_eq!(config.storage.namespace, "from-env");
        assert_eq!(config.remote.timeout_secs, 42);
        Ok(())
    });
}

#[test]
fn load_reads_project_config_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".qsheet")).map_err(|e| e.to_string())?;
        jail.create_file(".qsheet/config.toml", "[general]\ndefault_slug = \"project-sheet\"\n")?;

        let config = SheetConfig::load().expect("config loads");
        assert_eq!(config.general.default_slug, "project-sheet");
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("QSHEET_STORAGE__NAMESPACE", "bad:ns");
        assert!(SheetConfig::load().is_err());
        Ok(())
    });
}
