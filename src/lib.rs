//! `retrygate` is a request-retry interception layer for HTTP API clients.
//!
//! It sits between a request caller and the transport, deciding for every
//! outbound request whether a failed attempt is retried, how long to wait
//! before retrying, and when to give up:
//! - [`RetryOptions`] — retry budget, retryable status codes, backoff curve
//! - [`RetryInterceptor`] — the orchestrating retry loop
//! - [`Chain`] — the seam between the interceptor and the transport
//! - [`HttpTransport`] — a reqwest-backed [`Chain`] implementation
//!
//! ```no_run
//! use retrygate::{HttpTransport, Request, RetryInterceptor, RetryOptions};
//!
//! # async fn example() -> retrygate::Result<()> {
//! let transport = HttpTransport::new();
//! let interceptor = RetryInterceptor::new(RetryOptions::default().with_retry_limit(3));
//!
//! let mut chain = transport.chain(Request::get("https://api.example.test/entries"));
//! let response = interceptor.intercept(&mut chain).await?;
//! println!("{} {}", response.status, response.text());
//! # Ok(())
//! # }
//! ```

mod backoff;
mod cancel;
mod chain;
mod error;
mod interceptor;
mod options;
mod transport;

pub use backoff::{BackoffStrategy, CustomBackoff, TRANSPORT_FAILURE_STATUS};
pub use cancel::CancelToken;
pub use chain::{Chain, Request, Response};
pub use error::{RetryError, TransportError, TransportErrorKind};
pub use interceptor::RetryInterceptor;
pub use options::{RetryOptions, DEFAULT_RETRYABLE_STATUS_CODES};
pub use transport::{HttpChain, HttpTransport, TransportOptions};

pub type Result<T> = std::result::Result<T, RetryError>;
