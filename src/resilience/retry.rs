//! Bounded retry with a fixed backoff.

use crate::errors::LensesError;
use std::future::Future;
use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Delay between attempts
    pub delay: Duration,
    /// Jitter factor (0.0 to 1.0) to randomize delays
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
            jitter: 0.0,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that never retries
    pub fn none() -> Self {
        Self::default().with_max_retries(0)
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay between attempts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the jitter factor
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Delay before the next attempt, jitter applied
    pub fn calculate_delay(&self) -> Duration {
        let delay_ms = self.delay.as_millis() as f64;
        if self.jitter == 0.0 {
            return self.delay;
        }

        let jitter_range = delay_ms * self.jitter;
        let jitter_offset = rand::random::<f64>() * jitter_range * 2.0 - jitter_range;
        Duration::from_millis((delay_ms + jitter_offset).max(0.0) as u64)
    }
}

/// Context passed to retry hooks
#[derive(Debug, Clone)]
pub struct RetryContext {
    /// Attempt that just failed (1-based)
    pub attempt: u32,
    /// Maximum attempts allowed
    pub max_attempts: u32,
    /// Delay before the next attempt
    pub next_delay: Duration,
}

/// Decision returned by retry hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the operation
    Retry,
    /// Do not retry, fail immediately
    DoNotRetry,
    /// Retry only if the error is retryable
    Default,
}

/// Hook for customizing retry behavior
pub trait RetryHook: Send + Sync {
    /// Called after each failed attempt that could be retried
    fn on_retry(&self, context: &RetryContext, error: &LensesError) -> RetryDecision;
}

/// Default retry hook that uses standard behavior
#[derive(Debug, Default)]
pub struct DefaultRetryHook;

impl RetryHook for DefaultRetryHook {
    fn on_retry(&self, _context: &RetryContext, _error: &LensesError) -> RetryDecision {
        RetryDecision::Default
    }
}

/// Executor for retry operations
pub struct RetryExecutor {
    config: RetryConfig,
    hook: Box<dyn RetryHook>,
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryExecutor {
    /// Create a new retry executor with default configuration
    pub fn new() -> Self {
        Self::with_config(RetryConfig::default())
    }

    /// Create a new retry executor with custom configuration
    pub fn with_config(config: RetryConfig) -> Self {
        Self {
            config,
            hook: Box::new(DefaultRetryHook),
        }
    }

    /// Set a custom retry hook
    pub fn with_hook(mut self, hook: impl RetryHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// The executor's configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, fails for good, or retries run out
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, LensesError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LensesError>>,
    {
        let max_attempts = self.config.max_retries + 1;
        let mut attempt = 1;

        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if attempt >= max_attempts {
                return Err(error);
            }

            let context = RetryContext {
                attempt,
                max_attempts,
                next_delay: self.config.calculate_delay(),
            };

            let retry = match self.hook.on_retry(&context, &error) {
                RetryDecision::Retry => true,
                RetryDecision::DoNotRetry => false,
                RetryDecision::Default => error.is_retryable(),
            };
            if !retry {
                return Err(error);
            }

            tracing::debug!(
                attempt = attempt,
                max_attempts = max_attempts,
                delay_ms = context.next_delay.as_millis() as u64,
                error = %error,
                "Retrying request"
            );

            tokio::time::sleep(context.next_delay).await;
            attempt += 1;
        }
    }
}
