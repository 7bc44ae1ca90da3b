//! Remote sheet endpoint configuration.

use serde::{Deserialize, Serialize};

/// Public sheet-by-slug endpoint. The slug is appended as the last path segment.
fn default_base_url() -> String {
    String::from(
        "https://node.codolio.com/api/question-tracker/v1/sheet/public/get-sheet-by-slug",
    )
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from("qsheet/0.1")
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Endpoint prefix; requests go to `{base_url}/{slug}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// When false the sheet is served from local storage only.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            enabled: default_enabled(),
        }
    }
}

impl RemoteConfig {
    /// Check if the remote endpoint can be used.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.base_url.trim().is_empty()
    }

    /// Base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
