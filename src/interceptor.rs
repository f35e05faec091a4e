use std::time::Duration;

use tokio::time::sleep;

use crate::backoff::{builtin_delay, TRANSPORT_FAILURE_STATUS};
use crate::{CancelToken, Chain, Response, Result, RetryError, RetryOptions, TransportError};

/// Applies a retry policy around an abstract send operation.
///
/// One interceptor wraps one [`RetryOptions`] value, frozen at construction.
/// Every [`intercept`](RetryInterceptor::intercept) call keeps fully local
/// state (attempt counter, held response), so a single interceptor can be
/// shared across any number of concurrent in-flight requests.
#[derive(Clone, Debug)]
pub struct RetryInterceptor {
    options: RetryOptions,
}

impl RetryInterceptor {
    pub fn new(options: RetryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Runs the chain to completion under the configured retry policy.
    ///
    /// The request is forwarded unchanged on every attempt. Attempts are
    /// strictly sequential; the only suspension point besides the send itself
    /// is the backoff sleep between attempts.
    ///
    /// Returns the terminal [`Response`] — which may well be a failure the
    /// policy declined to retry, or the last failing response once the budget
    /// is spent — or a [`RetryError::Transport`] carrying the original
    /// transport failure when retries are disabled or exhausted.
    pub async fn intercept<C: Chain>(&self, chain: &mut C) -> Result<Response> {
        self.intercept_cancellable(chain, &CancelToken::new()).await
    }

    /// Like [`intercept`](RetryInterceptor::intercept), but aborts with
    /// [`RetryError::Interrupted`] if `cancel` fires during a backoff wait.
    /// The token stays cancelled afterward, so upstream cancellation keeps
    /// propagating.
    pub async fn intercept_cancellable<C: Chain>(
        &self,
        chain: &mut C,
        cancel: &CancelToken,
    ) -> Result<Response> {
        let request = chain.request().clone();
        let mut attempt: u32 = 0;

        loop {
            match chain.proceed(&request).await {
                Ok(response) => {
                    let status = response.status;
                    if !self.options.enabled
                        || !self.options.is_retryable_status(status)
                        || attempt >= self.options.retry_limit
                    {
                        return Ok(response);
                    }

                    // Release the discarded attempt's response before waiting
                    // so no connection resources are held across the backoff.
                    drop(response);
                    self.wait_before_retry(attempt, i32::from(status), None, cancel)
                        .await?;
                    attempt += 1;
                }
                Err(err) => {
                    if !self.options.enabled || attempt >= self.options.retry_limit {
                        return Err(RetryError::Transport(err));
                    }

                    self.wait_before_retry(attempt, TRANSPORT_FAILURE_STATUS, Some(&err), cancel)
                        .await?;
                    attempt += 1;
                }
            }
        }
    }

    /// Waits out the backoff delay for the retry with the given 0-based
    /// index, racing the sleep against the cancel token.
    async fn wait_before_retry(
        &self,
        attempt: u32,
        status: i32,
        transport_error: Option<&TransportError>,
        cancel: &CancelToken,
    ) -> Result<()> {
        let delay = match &self.options.custom_backoff {
            Some(custom) => custom(attempt, status, transport_error),
            None => builtin_delay(
                self.options.backoff_strategy,
                self.options.retry_delay,
                attempt,
            ),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(attempt, status, ?delay, "retrying request after backoff");

        if cancel.is_cancelled() {
            return Err(RetryError::Interrupted);
        }

        if delay > Duration::ZERO {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RetryError::Interrupted),
                () = sleep(delay) => {}
            }
        }

        Ok(())
    }
}
