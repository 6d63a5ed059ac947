//! Rate-limit retry policy
//!
//! Runs a fetch operation and, while the remote keeps signalling rate
//! limiting, sleeps with exponential backoff before trying again. Any
//! other failure is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::config;
use crate::error::CatalogError;
use crate::log_warn;

const MODULE: &str = "retry";

/// Bounded exponential backoff, retrying only on [`CatalogError::RateLimited`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total invocations allowed, the first one included
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after every backoff
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: config::retry::MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(config::retry::INITIAL_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Delays slept between attempts when every attempt but the last is
    /// rate limited: `d, 2d, 4d, ...`, one fewer than `max_attempts`.
    pub fn backoff_schedule(&self) -> impl ExactSizeIterator<Item = Duration> {
        let initial = self.initial_delay;
        (0..self.max_attempts.max(1) - 1).map(move |n| initial.saturating_mul(1u32 << n.min(31)))
    }

    /// Execute `operation`, retrying while it fails with a rate-limit error.
    ///
    /// Returns the first success, the first non-rate-limit error, or the last
    /// rate-limit error once `max_attempts` invocations have been made.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut delays = self.backoff_schedule();

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => err,
                Err(err) => return Err(err),
            };

            let Some(delay) = delays.next() else {
                return Err(err);
            };
            log_warn!(
                MODULE,
                "{}; retrying in {:.1}s ({} attempts left)",
                err,
                delay.as_secs_f64(),
                delays.len() + 1
            );
            tokio::time::sleep(delay).await;
        }
    }
}
