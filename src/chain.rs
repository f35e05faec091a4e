use std::borrow::Cow;
use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::TransportError;

/// Outbound request descriptor: method, URL, headers, optional body.
///
/// The interceptor never mutates a request; it forwards the same descriptor
/// unchanged on every attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a JSON body and the matching content type.
    pub fn with_json<T: Serialize>(mut self, payload: &T) -> serde_json::Result<Self> {
        self.body = Some(serde_json::to_vec(payload)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Response produced by one attempt: status code, headers, raw body.
///
/// Dropping a `Response` releases everything it holds, which is how the
/// interceptor discards the result of a retried-away attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// One hop of request processing: the outbound request plus the ability to
/// hand it to the underlying transport.
///
/// This is the seam the [`RetryInterceptor`](crate::RetryInterceptor) wraps.
/// `proceed` performs one send attempt and resolves to either a [`Response`]
/// (whatever its status) or a [`TransportError`] when no response exists.
pub trait Chain {
    /// The request this chain was created for.
    fn request(&self) -> &Request;

    /// Sends the request through the underlying transport once.
    fn proceed(
        &mut self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}
