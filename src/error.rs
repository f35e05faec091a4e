use std::fmt;

/// Error type returned by this crate.
///
/// HTTP responses are never errors at this layer, whatever their status code:
/// a non-retryable or budget-exhausting status surfaces as an ordinary
/// [`Response`](crate::Response) for the caller to interpret.
#[derive(Debug, thiserror::Error)]
pub enum RetryError {
    /// Transport failure surfaced after retrying was disabled or exhausted.
    ///
    /// The inner error is the original failure from the last attempt,
    /// unchanged — no wrapping, no synthetic retry-count message.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The backoff wait was cancelled before the next attempt could run.
    #[error("transport interrupted: retry aborted while waiting to re-attempt")]
    Interrupted,
}

/// Classification of a transport-level failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportErrorKind {
    /// The request did not complete within the transport timeout.
    Timeout,
    /// Establishing a connection failed (refused, reset, DNS).
    Connect,
    /// The request could not be sent.
    Request,
    /// The response body could not be read.
    Body,
    /// Anything the transport could not classify further.
    Other,
}

/// Network or request execution error raised by the transport.
#[derive(Debug, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// The failure message as produced by the underlying transport.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }

    pub fn is_connect(&self) -> bool {
        self.kind == TransportErrorKind::Connect
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_request() {
            TransportErrorKind::Request
        } else if err.is_body() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };

        // Chase the source chain so "error sending request" style wrappers
        // keep the underlying cause in the message.
        let mut message = err.to_string();
        let mut source: Option<&(dyn std::error::Error + 'static)> =
            std::error::Error::source(&err);
        while let Some(cause) = source {
            message = format!("{message}: {cause}");
            source = cause.source();
        }

        Self { kind, message }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}
