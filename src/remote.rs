//! Remote tuning document source
//!
//! Fetches the tuning document from its remote store. No configured URL
//! means defaults and no overrides; a configured URL that cannot be
//! fetched is fatal for the run.

use crate::config::RemoteConfig;
use crate::error::{CalorError, Result};
use crate::logging::get_logger;
use crate::tuning::TuningDocument;

/// Parse a fetched document body
///
/// Some stores hand the document back wrapped in a JSON string with
/// escaped quotes; unwrap one level of that before deserializing.
pub fn parse_document(body: &str) -> Result<TuningDocument> {
    let value: serde_json::Value = serde_json::from_str(body.trim())?;
    match value {
        serde_json::Value::String(inner) => Ok(serde_json::from_str(&inner)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Remote tuning client
pub struct RemoteTuningClient {
    config: RemoteConfig,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl RemoteTuningClient {
    /// Create a new remote tuning client
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let logger = get_logger("remote");
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config: config.clone(),
            http,
            logger,
        })
    }

    /// Fetch the tuning document, or defaults when no URL is configured
    pub async fn fetch(&self) -> Result<TuningDocument> {
        if self.config.url.is_empty() {
            self.logger
                .debug("No remote tuning URL configured, using defaults");
            return Ok(TuningDocument::default());
        }

        self.logger
            .debug(&format!("Fetching tuning document from {}", self.config.url));
        let resp = self.http.get(&self.config.url).send().await?;
        if !resp.status().is_success() {
            return Err(CalorError::api(format!(
                "Tuning document fetch failed with status {}",
                resp.status()
            )));
        }
        let body = resp.text().await?;
        parse_document(&body)
    }
}
