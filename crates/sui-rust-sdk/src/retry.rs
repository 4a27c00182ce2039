//! Retry with exponential backoff for idempotent reads.
//!
//! Only reads go through [`RetryExecutor`]. Submitting a transaction again
//! after a lost response could execute it twice from the caller's point of
//! view, so dispatch never retries.
//!
//! # Example
//!
//! ```rust
//! use sui_rust_sdk::retry::RetryConfig;
//!
//! let config = RetryConfig {
//!     max_retries: 5,
//!     jitter: false,
//!     ..RetryConfig::default()
//! };
//! assert_eq!(config.delay_for_attempt(2).as_millis(), 200);
//! ```

use crate::error::{SuiError, SuiResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Retry policy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound on any delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Growth factor between consecutive delays.
    pub exponential_base: f64,
    /// Randomize delays by up to `jitter_factor` in either direction.
    pub jitter: bool,
    /// Fraction of the delay used as jitter range (0.0 to 1.0).
    pub jitter_factor: f64,
    /// HTTP statuses worth retrying.
    pub retryable_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
            exponential_base: 2.0,
            jitter: true,
            jitter_factor: 0.5,
            retryable_status_codes: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Fail on the first error.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Many quick retries.
    pub fn aggressive() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 50,
            max_delay_ms: 5_000,
            exponential_base: 1.5,
            jitter_factor: 0.3,
            ..Default::default()
        }
    }

    /// Few, widely spaced retries.
    pub fn conservative() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt` (1-based); zero for attempt 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let base = self.initial_delay_ms as f64 * self.exponential_base.powi(exponent);
        let capped = base.min(self.max_delay_ms as f64);
        let delay = if self.jitter {
            let range = capped * self.jitter_factor.clamp(0.0, 1.0);
            (capped + rand::random::<f64>() * range * 2.0 - range).max(0.0)
        } else {
            capped
        };
        Duration::from_millis(delay as u64)
    }

    /// Whether an HTTP status is worth retrying.
    pub fn is_retryable_status(&self, status_code: u16) -> bool {
        self.retryable_status_codes.contains(&status_code)
    }

    /// Whether an error is worth retrying under this policy.
    pub fn is_retryable_error(&self, error: &SuiError) -> bool {
        match error {
            SuiError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            SuiError::Api { status_code, .. } => self.is_retryable_status(*status_code),
            SuiError::Dispatch { .. } => error.is_retryable(),
            _ => false,
        }
    }
}

/// Runs an async read, retrying transient failures.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    /// Creates an executor for `config`.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Runs `operation` until it succeeds, fails permanently, or retries run
    /// out. The last error is returned.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> SuiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SuiResult<T>>,
    {
        self.execute_with_predicate(operation, |e| self.config.is_retryable_error(e))
            .await
    }

    /// Like [`execute`](Self::execute) with a caller supplied retry predicate.
    pub async fn execute_with_predicate<F, Fut, T, P>(
        &self,
        operation: F,
        should_retry: P,
    ) -> SuiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SuiResult<T>>,
        P: Fn(&SuiError) -> bool,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.config.max_retries && should_retry(&error) => {
                    attempt += 1;
                    let delay = self.config.delay_for_attempt(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, error = %error, "retrying read");
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }
}
