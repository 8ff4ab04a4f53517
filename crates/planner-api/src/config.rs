//! Client configuration

use crate::error::{ApiError, Result};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

pub const ENV_API_URL: &str = "CLIMATE_API_URL";
pub const ENV_MAX_ATTEMPTS: &str = "CLIMATE_API_MAX_ATTEMPTS";
pub const ENV_RETRY_BASE_MS: &str = "CLIMATE_API_RETRY_BASE_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8000/api`
    pub base_url: String,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Defaults overridden by `CLIMATE_API_URL`, `CLIMATE_API_MAX_ATTEMPTS`
    /// and `CLIMATE_API_RETRY_BASE_MS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            config.retry.max_attempts = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::InvalidConfig(format!("{}={}", ENV_MAX_ATTEMPTS, raw)))?;
        }
        if let Some(raw) = lookup(ENV_RETRY_BASE_MS) {
            config.retry.base_delay_ms = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::InvalidConfig(format!("{}={}", ENV_RETRY_BASE_MS, raw)))?;
        }

        debug!(base_url = %config.base_url, retry = ?config.retry, "client config loaded");
        Ok(config)
    }
}
