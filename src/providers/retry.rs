// Retry logic with exponential backoff

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::constants::RETRY_BASE_DELAY_MS;

/// How many times to re-issue a failed provider call, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first; zero disables retry
    pub max_retries: u32,
    /// Delay before the first retry; doubles each time
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(RETRY_BASE_DELAY_MS),
        }
    }

    /// Single attempt, no backoff.
    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Upper bound for a full retry sequence when each attempt is capped at
    /// `per_attempt`: every attempt plus every backoff sleep between them.
    pub fn worst_case(&self, per_attempt: Duration) -> Duration {
        let attempts = per_attempt * (self.max_retries + 1);
        let backoff: Duration = (0..self.max_retries).map(|a| self.delay_for(a)).sum();
        attempts + backoff
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Execute a function with exponential backoff retry logic
pub async fn with_retry<F, Fut, T>(policy: RetryPolicy, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let attempts = policy.max_retries + 1;
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt + 1 >= attempts => return Err(e),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    "Request failed (attempt {}/{}): {:#}; retrying in {:?}",
                    attempt + 1,
                    attempts,
                    e,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
