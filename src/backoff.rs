use std::sync::Arc;
use std::time::Duration;

use crate::TransportError;

/// Status code handed to a custom backoff strategy when no HTTP response
/// exists, i.e. the attempt failed at the transport level.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// Built-in delay curve selected by
/// [`RetryOptions::with_backoff_strategy`](crate::RetryOptions::with_backoff_strategy).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackoffStrategy {
    /// The base delay, every attempt.
    Fixed,
    /// `base * (attempt + 1)`.
    Linear,
    /// `base * 2^attempt`.
    Exponential,
}

/// User-supplied backoff function.
///
/// Called exactly once per retry decision (not per send) with the 0-based
/// index of the retry about to run, the HTTP status code that triggered it
/// (or [`TRANSPORT_FAILURE_STATUS`] for a transport failure, in which case
/// the error is also passed), and returning the wait before the next attempt.
/// `Duration::ZERO` means "retry immediately". When set, a custom strategy
/// takes precedence over the built-in curve for every retry.
pub type CustomBackoff = Arc<dyn Fn(u32, i32, Option<&TransportError>) -> Duration + Send + Sync>;

/// Computes the built-in delay for the retry with the given 0-based index.
///
/// Arithmetic saturates rather than overflows; the exponential shift is
/// capped so large attempt counts stay well-defined.
pub(crate) fn builtin_delay(strategy: BackoffStrategy, base: Duration, attempt: u32) -> Duration {
    match strategy {
        BackoffStrategy::Fixed => base,
        BackoffStrategy::Linear => base.saturating_mul(attempt.saturating_add(1)),
        BackoffStrategy::Exponential => {
            let multiplier = 1u32 << attempt.min(16);
            base.saturating_mul(multiplier)
        }
    }
}
