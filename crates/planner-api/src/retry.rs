//! Exponential backoff for retryable backend failures

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first; treated as at least 1
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each one after
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self::new(1, 0)
    }

    /// Delay after failed attempt `attempt` (0-based): `base * 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt ceiling is reached. The last error is returned.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(
                        request = label,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %e,
                        "retryable backend failure"
                    );
                    last_error = Some(e);
                    if attempt + 1 < attempts {
                        tokio::time::sleep(self.delay_for(attempt)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApiError::RequestFailed(format!("{} failed after {} attempts", label, attempts))
        }))
    }
}
