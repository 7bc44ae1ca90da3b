//! Persistence gateway: local-first sheet loading with remote refresh.
//!
//! The durable copy is the whole serialized sheet under one key per slug.
//! Remote failures are never returned as errors; they degrade to the local
//! copy, or to an empty sheet, plus an advisory warning.

use qsheet_config::SheetConfig;
use qsheet_core::{LoadSource, Sheet};
use qsheet_remote::{SheetClient, normalize_sheet};
use qsheet_storage::{LocalStore, storage_key};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip the local copy and go to the remote endpoint first.
    pub force_refresh: bool,
}

impl LoadOptions {
    #[must_use]
    pub const fn forced() -> Self {
        Self {
            force_refresh: true,
        }
    }
}

/// Result of [`PersistenceGateway::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub sheet: Sheet,
    pub source: LoadSource,
    /// Advisory message when the remote fetch failed.
    pub warning: Option<String>,
}

/// Reads and writes whole sheets against local storage and the remote endpoint.
#[derive(Debug)]
pub struct PersistenceGateway {
    client: Option<SheetClient>,
    local: LocalStore,
    namespace: String,
}

impl PersistenceGateway {
    /// Create a gateway. Pass `None` as the client for offline use.
    #[must_use]
    pub fn new(
        client: Option<SheetClient>,
        local: LocalStore,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            client,
            local,
            namespace: namespace.into(),
        }
    }

    /// Build a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Remote`] if the HTTP client cannot be built.
    pub fn from_config(config: &SheetConfig) -> Result<Self, StoreError> {
        let client = if config.remote.is_configured() {
            Some(SheetClient::new(&config.remote)?)
        } else {
            tracing::debug!("remote endpoint disabled; gateway is offline");
            None
        };
        Ok(Self::new(
            client,
            LocalStore::from_config(&config.storage),
            config.storage.namespace.clone(),
        ))
    }

    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    #[must_use]
    pub const fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Storage key of the durable copy for `slug`.
    #[must_use]
    pub fn key(&self, slug: &str) -> String {
        storage_key(&self.namespace, slug)
    }

    /// Read the durable copy for `slug`.
    ///
    /// A copy stored under the key but carrying a different slug is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the store cannot be read, or
    /// [`StoreError::Serialization`] if the stored value is not JSON.
    pub fn read_local(&self, slug: &str) -> Result<Option<Sheet>, StoreError> {
        let Some(raw) = self.local.get(&self.key(slug))? else {
            return Ok(None);
        };
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if !value.is_object() {
            return Ok(None);
        }
        // Copies written by `save` are canonical; older or hand-edited ones
        // go through the tolerant decoder.
        let sheet = serde_json::from_value::<Sheet>(value.clone()).unwrap_or_else(|error| {
            tracing::debug!(slug, %error, "local copy is not canonical; normalizing");
            normalize_sheet(&value, Some(slug))
        });
        if sheet.slug != slug {
            tracing::debug!(
                slug,
                stored = %sheet.slug,
                "local copy belongs to another sheet; ignoring"
            );
            return Ok(None);
        }
        Ok(Some(sheet))
    }

    /// [`Self::read_local`] with failures logged and treated as a miss.
    fn local_copy(&self, slug: &str) -> Option<Sheet> {
        self.read_local(slug).unwrap_or_else(|error| {
            tracing::warn!(slug, %error, "local copy unreadable; ignoring");
            None
        })
    }

    /// Load the sheet for `slug`.
    ///
    /// 1. Unless forced, a non-empty local copy is returned without network access.
    /// 2. Otherwise the remote sheet is fetched, normalized, and saved locally.
    /// 3. On remote failure the local copy (even an empty one) is returned with
    ///    a warning; without one, an empty sheet for `slug`.
    pub async fn load(&self, slug: &str, options: LoadOptions) -> LoadOutcome {
        let local = self.local_copy(slug);
        if !options.force_refresh
            && let Some(sheet) = local.as_ref().filter(|sheet| !sheet.is_empty())
        {
            tracing::debug!(slug, topics = sheet.topics.len(), "loaded local copy");
            return LoadOutcome {
                sheet: sheet.clone(),
                source: LoadSource::Local,
                warning: None,
            };
        }

        let Some(client) = &self.client else {
            return fallback(slug, local, None);
        };

        match client.fetch_sheet(slug).await {
            Ok(sheet) => {
                if let Err(error) = self.save(&sheet) {
                    tracing::warn!(slug, %error, "failed to store fetched sheet");
                }
                LoadOutcome {
                    sheet,
                    source: LoadSource::Remote,
                    warning: None,
                }
            }
            Err(error) => {
                tracing::warn!(slug, %error, "remote load failed; falling back to local data");
                let warning = format!("Could not reach the sheet service ({error}).");
                fallback(slug, local, Some(warning))
            }
        }
    }

    /// Overwrite the durable copy with the full `sheet`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the storage write fails.
    pub fn save(&self, sheet: &Sheet) -> Result<(), StoreError> {
        let raw = serde_json::to_string(sheet)?;
        self.local.set(&self.key(&sheet.slug), &raw)?;
        Ok(())
    }

    /// Remove the durable copy for `slug`, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the removal fails.
    pub fn clear(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.local.remove(&self.key(slug))?)
    }
}

fn fallback(slug: &str, local: Option<Sheet>, warning: Option<String>) -> LoadOutcome {
    match local {
        Some(sheet) => LoadOutcome {
            sheet,
            source: LoadSource::Local,
            warning,
        },
        None => LoadOutcome {
            sheet: Sheet::empty(slug),
            source: LoadSource::Empty,
            warning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qsheet_core::{Question, SubTopic, Topic};
    use std::sync::Arc;

    fn offline() -> PersistenceGateway {
        PersistenceGateway::new(None, LocalStore::in_memory(), "question-sheet")
    }

    fn sample(slug: &str) -> Sheet {
        Sheet::empty(slug).with_topics(vec![Arc::new(Topic::new("Arrays"))])
    }

    #[tokio::test]
    async fn empty_store_offline_yields_empty_sheet() {
        let gateway = offline();
        let outcome = gateway.load("sde-sheet", LoadOptions::default()).await;
        assert_eq!(outcome.sheet, Sheet::empty("sde-sheet"));
        assert_eq!(outcome.source, LoadSource::Empty);
        assert_eq!(outcome.warning, None);
    }

    #[tokio::test]
    async fn saved_sheet_is_loaded_back() {
        let gateway = offline();
        let sheet = sample("sde-sheet");
        gateway.save(&sheet).unwrap();

        let outcome = gateway.load("sde-sheet", LoadOptions::default()).await;
        assert_eq!(outcome.sheet, sheet);
        assert_eq!(outcome.source, LoadSource::Local);
    }

    #[test]
    fn copies_are_keyed_per_slug() {
        let gateway = offline();
        gateway.save(&sample("a")).unwrap();
        gateway.save(&sample("b")).unwrap();
        assert_eq!(gateway.key("a"), "question-sheet:a");

        assert!(gateway.clear("a").unwrap());
        assert!(gateway.read_local("a").unwrap().is_none());
        assert!(gateway.read_local("b").unwrap().is_some());
        assert!(!gateway.clear("a").unwrap());
    }

    #[test]
    fn saved_copy_reads_back_verbatim() {
        let gateway = offline();
        let question = Question {
            id: "q-1".into(),
            text: "  padded  ".into(),
            link: String::new(),
        };
        let blank = SubTopic {
            id: "s-1".into(),
            title: String::new(),
            questions: vec![Arc::new(question)],
        };
        let sheet = Sheet::empty("s").with_topics(vec![Arc::new(
            Topic::new("").with_sub_topics(vec![Arc::new(blank)]),
        )]);
        gateway.save(&sheet).unwrap();

        assert_eq!(gateway.read_local("s").unwrap(), Some(sheet));
    }

    #[test]
    fn loose_copy_is_normalized() {
        let gateway = offline();
        let loose = r#"{"name":"Old","topicList":[{"topicName":"Arrays"}]}"#;
        gateway.local().set(&gateway.key("s"), loose).unwrap();

        let sheet = gateway.read_local("s").unwrap().unwrap();
        assert_eq!(sheet.slug, "s");
        assert_eq!(sheet.title, "Old");
        assert_eq!(sheet.topics[0].title, "Arrays");
    }

    #[test]
    fn copy_with_foreign_slug_is_ignored() {
        let gateway = offline();
        let foreign = serde_json::to_string(&sample("other")).unwrap();
        gateway.local().set(&gateway.key("mine"), &foreign).unwrap();
        assert!(gateway.read_local("mine").unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_copy_is_treated_as_missing() {
        let gateway = offline();
        gateway.local().set(&gateway.key("s"), "{not json").unwrap();
        assert!(matches!(gateway.read_local("s"), Err(StoreError::Serialization(_))));

        let outcome = gateway.load("s", LoadOptions::default()).await;
        assert_eq!(outcome.source, LoadSource::Empty);
    }

    #[tokio::test]
    async fn unavailable_storage_is_silent() {
        let gateway = PersistenceGateway::new(None, LocalStore::unavailable(), "question-sheet");
        gateway.save(&sample("s")).unwrap();
        assert!(!gateway.clear("s").unwrap());
        let outcome = gateway.load("s", LoadOptions::forced()).await;
        assert_eq!(outcome.sheet, Sheet::empty("s"));
    }
}
