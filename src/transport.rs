use std::time::Duration;

use crate::{Chain, Request, Response, TransportError};

/// Transport-level configuration, separate from retry policy.
///
/// The per-request timeout lives here rather than on the chain: how long a
/// single send may take is a transport concern, not a retry-policy one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// reqwest-backed transport producing [`Chain`] values for the interceptor.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
    options: TransportOptions,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates a chain that sends `request` through this transport.
    ///
    /// The chain borrows nothing from the transport; the underlying
    /// `reqwest::Client` is cheaply cloned and shares its connection pool.
    pub fn chain(&self, request: Request) -> HttpChain {
        HttpChain {
            http: self.http.clone(),
            timeout: Duration::from_millis(self.options.timeout_ms),
            request,
        }
    }
}

/// A single request bound to the transport that will send it.
#[derive(Clone, Debug)]
pub struct HttpChain {
    http: reqwest::Client,
    timeout: Duration,
    request: Request,
}

impl Chain for HttpChain {
    fn request(&self) -> &Request {
        &self.request
    }

    async fn proceed(&mut self, request: &Request) -> Result<Response, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.as_str())
            .headers(request.headers.clone())
            .timeout(self.timeout);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
