//! Entity kinds and load provenance for qsheet.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The three levels of the sheet hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Topic,
    SubTopic,
    Question,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::SubTopic => "sub_topic",
            Self::Question => "question",
        }
    }

    /// ID prefix used when generating identities of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Topic => crate::ids::PREFIX_TOPIC,
            Self::SubTopic => crate::ids::PREFIX_SUB_TOPIC,
            Self::Question => crate::ids::PREFIX_QUESTION,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LoadSource
// ---------------------------------------------------------------------------

/// Where the sheet currently held in memory came from.
///
/// ```text
/// idle → remote   (fetched and cached)
///      → local    (durable copy, either local-first or network fallback)
///      → empty    (nothing cached and the fetch failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    #[default]
    Idle,
    Remote,
    Local,
    Empty,
}

impl LoadSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Empty => "empty",
        }
    }

    /// Human-readable status line for the loaded sheet.
    #[must_use]
    pub const fn status_message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Remote => Some("Loaded from API."),
            Self::Local | Self::Empty => Some("Showing local data."),
        }
    }
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
