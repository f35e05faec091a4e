use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::backoff::{BackoffStrategy, CustomBackoff};
use crate::TransportError;

/// Default HTTP status codes eligible for retry.
pub const DEFAULT_RETRYABLE_STATUS_CODES: [u16; 5] = [408, 429, 502, 503, 504];

/// Configures retry behavior for a [`RetryInterceptor`](crate::RetryInterceptor).
///
/// Built with chained setters and then frozen: the interceptor takes the
/// options by value, and nothing mutates them once requests start flowing,
/// so one interceptor can serve any number of concurrent calls.
///
/// ```
/// use std::time::Duration;
/// use retrygate::{BackoffStrategy, RetryOptions};
///
/// let options = RetryOptions::default()
///     .with_retry_limit(3)
///     .with_backoff_strategy(BackoffStrategy::Linear)
///     .with_retry_delay(Duration::from_millis(200));
/// ```
#[derive(Clone)]
pub struct RetryOptions {
    /// Master switch; when false no retries occur regardless of other fields.
    pub enabled: bool,
    /// Maximum number of retries after the initial attempt; 0 means "try
    /// once, never retry".
    pub retry_limit: u32,
    /// HTTP status codes eligible for retry. An empty set disables
    /// status-based retry entirely.
    pub retryable_status_codes: BTreeSet<u16>,
    /// Built-in delay curve, used when no custom strategy is set.
    pub backoff_strategy: BackoffStrategy,
    /// Base delay unit for the built-in curves.
    pub retry_delay: Duration,
    /// Optional custom backoff function; when set it overrides
    /// `backoff_strategy` and `retry_delay` entirely.
    pub custom_backoff: Option<CustomBackoff>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            retry_limit: 5,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.into_iter().collect(),
            backoff_strategy: BackoffStrategy::Exponential,
            retry_delay: Duration::from_millis(300),
            custom_backoff: None,
        }
    }
}

impl RetryOptions {
    /// Enables or disables retrying altogether.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the number of retries allowed after the initial attempt.
    pub fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Replaces the set of status codes eligible for retry.
    pub fn with_retryable_status_codes(
        mut self,
        codes: impl IntoIterator<Item = u16>,
    ) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    /// Selects the built-in delay curve.
    pub fn with_backoff_strategy(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff_strategy = strategy;
        self
    }

    /// Sets the base delay unit for the built-in curves.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Installs a custom backoff function, overriding the built-in curve.
    ///
    /// See [`CustomBackoff`] for the calling contract.
    pub fn with_custom_backoff<F>(mut self, backoff: F) -> Self
    where
        F: Fn(u32, i32, Option<&TransportError>) -> Duration + Send + Sync + 'static,
    {
        self.custom_backoff = Some(Arc::new(backoff));
        self
    }

    /// True when this status code should trigger a retry.
    pub(crate) fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("enabled", &self.enabled)
            .field("retry_limit", &self.retry_limit)
            .field("retryable_status_codes", &self.retryable_status_codes)
            .field("backoff_strategy", &self.backoff_strategy)
            .field("retry_delay", &self.retry_delay)
            .field("custom_backoff", &self.custom_backoff.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
