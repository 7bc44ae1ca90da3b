//! # qsheet-remote
//!
//! Client for the remote sheet-by-slug endpoint.
//!
//! A single `GET {base_url}/{slug}` returns a JSON body whose sheet payload
//! may be nested under `data.sheet`, `data`, or `sheet`. The payload shape
//! varies between sources; [`normalize`] turns any of them into the canonical
//! [`Sheet`]. Any non-success status is an error; no retries are performed.

mod error;
pub mod normalize;

pub use error::RemoteError;
pub use normalize::{normalize_sheet, unwrap_envelope};

use std::time::Duration;

use qsheet_config::RemoteConfig;
use qsheet_core::Sheet;

/// HTTP client for the remote sheet endpoint.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client` cannot
    /// be built (e.g. an invalid user agent).
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    /// URL of the sheet resource for `slug`.
    #[must_use]
    pub fn sheet_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(slug))
    }

    /// Fetch the raw JSON body for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the endpoint returns a
    /// non-success status, or the body is not JSON.
    pub async fn fetch_raw(&self, slug: &str) -> Result<serde_json::Value, RemoteError> {
        let url = self.sheet_url(slug);
        tracing::debug!(%url, "fetching sheet");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| RemoteError::Parse(format!("invalid JSON body: {e}")))
    }

    /// Fetch and normalize the sheet for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] as [`Self::fetch_raw`] does, plus
    /// [`RemoteError::Parse`] when the unwrapped payload is not a JSON object.
    pub async fn fetch_sheet(&self, slug: &str) -> Result<Sheet, RemoteError> {
        let body = self.fetch_raw(slug).await?;
        let payload = unwrap_envelope(&body);
        if !payload.is_object() {
            return Err(RemoteError::Parse(format!(
                "expected a sheet object, got {}",
                json_kind(payload)
            )));
        }
        let sheet = normalize_sheet(payload, Some(slug));
        tracing::debug!(
            slug = %sheet.slug,
            topics = sheet.topics.len(),
            questions = sheet.question_count(),
            "fetched sheet"
        );
        Ok(sheet)
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_url_encodes_slug() {
        let config = RemoteConfig {
            base_url: "http://localhost:9000/sheets/".into(),
            ..RemoteConfig::default()
        };
        let client = SheetClient::new(&config).unwrap();
        assert_eq!(client.sheet_url("sde sheet"), "http://localhost:9000/sheets/sde%20sheet");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_default_sheet() {
        let client = SheetClient::new(&RemoteConfig::default()).unwrap();
        match client.fetch_sheet("striver-sde-sheet").await {
            Ok(sheet) => println!(
                "\n── {} ── {} topics, {} questions",
                sheet.title,
                sheet.topics.len(),
                sheet.question_count()
            ),
            Err(e) => println!("\n── fetch failed: {e}"),
        }
    }
}
