use std::time::Duration;

use crate::error::{ProbeError, Result};

pub const DEFAULT_API_URL: &str = "https://alsom.vercel.app/api/chat";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const API_URL_ENV: &str = "ALSOM_API_URL";
pub const TIMEOUT_ENV: &str = "ALSOM_TIMEOUT_SECS";

/// Where to probe and how long to wait for each response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    url: String,
    timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `ALSOM_API_URL` / `ALSOM_TIMEOUT_SECS` when set
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.url = url;
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                ProbeError::Config(format!(
                    "{} must be a whole number of seconds, got `{}`",
                    TIMEOUT_ENV, raw
                ))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.url).map_err(|err| {
            ProbeError::Config(format!("invalid API URL `{}`: {}", self.url, err))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProbeError::Config(format!(
                "API URL must use http or https, got `{}`",
                parsed.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ProbeError::Config("timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}
