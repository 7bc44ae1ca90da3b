//! General sheet behaviour.

use serde::{Deserialize, Serialize};

fn default_slug() -> String {
    String::from("striver-sde-sheet")
}

/// Seconds a deleted item stays restorable.
const fn default_undo_ttl_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Sheet loaded when the caller does not name one.
    #[serde(default = "default_slug")]
    pub default_slug: String,

    /// How long the last deletion can be undone.
    #[serde(default = "default_undo_ttl_secs")]
    pub undo_ttl_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_slug: default_slug(),
            undo_ttl_secs: default_undo_ttl_secs(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub const fn undo_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.undo_ttl_secs)
    }
}
