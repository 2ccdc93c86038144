use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::ProbeConfig,
    error::{ProbeError, Result},
    types::{payload::ChatPayload, response::truncate_chars},
};

/// Characters of an error body kept in the report
pub(crate) const ERROR_BODY_CHARS: usize = 500;

/// Sends one chat payload per call; nothing is retried or reused
#[derive(Clone, Debug)]
pub struct ChatClient {
    url: String,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            url: config.url().to_string(),
            timeout: config.timeout(),
        }
    }

    /// POST `payload` and return the status with the decoded JSON body
    pub async fn send(&self, payload: &ChatPayload) -> Result<(u16, Value)> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                ProbeError::unexpected("client", format!("Failed to build HTTP client: {err}"))
            })?;

        let response = client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        debug!(status = status.as_u16(), bytes = response_text.len(), "response received");

        if !status.is_success() {
            return Err(ProbeError::Http {
                status: status.as_u16(),
                body: truncate_chars(&response_text, ERROR_BODY_CHARS).to_string(),
                details: serde_json::from_str(&response_text).ok(),
            });
        }

        let body: Value = serde_json::from_str(&response_text)?;
        Ok((status.as_u16(), body))
    }
}
