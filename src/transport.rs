//! Transport boundary: one HTTP exchange per call.
//!
//! The executor does not speak HTTP itself. It hands a
//! [`RequestSpec`](crate::RequestSpec) to a [`Transport`] and gets back
//! either a [`TransportResponse`] (status, headers, raw body) or a
//! [`TransportFault`] for failures below the HTTP layer (DNS, connect,
//! reset).
//!
//! # Cancellation
//!
//! Cancellation is by drop. Each attempt races the future returned by
//! [`Transport::send`] against a deadline; when the deadline wins, the
//! in-flight future is dropped, which is the transport's signal to abandon
//! the exchange and release its resources. Implementations must therefore be
//! drop-safe mid-flight, which every well-behaved async client already is.

use futures::future::BoxFuture;

use crate::request::RequestSpec;

/// Performs one HTTP exchange for a request spec.
///
/// One call to [`send`](Transport::send) is one attempt; the executor calls
/// it afresh for every retry. Implementations should not retry internally -
/// the executor owns the retry budget.
pub trait Transport: Send + Sync {
    /// Issue the request and read the full response body.
    ///
    /// Returns `Err` only for failures below the HTTP layer; a response with
    /// a non-2xx status is still `Ok` - classifying statuses is the
    /// executor's job.
    fn send<'a>(
        &'a self,
        spec: &'a RequestSpec,
    ) -> BoxFuture<'a, Result<TransportResponse, TransportFault>>;
}

/// What one completed HTTP exchange produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response with a status and body and no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Attach a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The response headers, in arrival order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response, keeping only the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is 5xx.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// A network failure below the HTTP layer.
///
/// Deadline expiry is *not* a fault: the executor detects it from the race
/// itself, so a fault always means the transport failed on its own (DNS
/// resolution, connection refused, reset mid-body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFault {
    message: String,
}

impl TransportFault {
    /// Create a fault with a description of what failed.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for TransportFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transport fault: {}", self.message)
    }
}

impl std::error::Error for TransportFault {}
