//! Request description for one logical call.
//!
//! A [`RequestSpec`] is pure data: it describes the call but performs none of
//! it. Defaults for the resilience knobs are applied at construction, so a
//! spec is always fully resolved - there is no process-wide configuration to
//! consult later.
//!
//! Method, headers, and body are opaque to the retry machinery; they are
//! forwarded to the [`Transport`](crate::Transport) untouched on every
//! attempt.
//!
//! # Examples
//!
//! ```rust
//! use surefetch::RequestSpec;
//! use std::time::Duration;
//!
//! let spec = RequestSpec::get("https://api.example.com/users/42")
//!     .with_header("accept", "application/json")
//!     .with_timeout(Duration::from_millis(800))
//!     .with_max_retries(2);
//!
//! assert_eq!(spec.method(), "GET");
//! assert_eq!(spec.timeout(), Duration::from_millis(800));
//! assert_eq!(spec.max_retries(), 2);
//! ```

use std::time::Duration;

/// Default per-attempt deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default retry budget for retryable failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Immutable description of one logical request.
///
/// Built once per call and reused unchanged across every retry; only the
/// executor's local attempt counters change between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Duration,
    max_retries: u32,
}

impl RequestSpec {
    /// Create a spec with the given method and URL.
    ///
    /// Timeout and retry budget start at [`DEFAULT_TIMEOUT`] and
    /// [`DEFAULT_MAX_RETRIES`].
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a `GET` spec for the given URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surefetch::RequestSpec;
    ///
    /// let spec = RequestSpec::get("https://api.example.com/health");
    /// assert_eq!(spec.method(), "GET");
    /// assert!(spec.body().is_none());
    /// ```
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Append a header, keeping any already present.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the per-attempt deadline.
    ///
    /// Every attempt gets a fresh full deadline; backoff waits between
    /// attempts do not consume it.
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero. A zero deadline would fail every attempt
    /// before the transport runs, which is always a caller bug.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "RequestSpec timeout must be positive");
        self.timeout = timeout;
        self
    }

    /// Set the retry budget.
    ///
    /// This does not include the initial attempt: `with_max_retries(3)`
    /// allows up to 4 transport attempts. Zero disables retries entirely.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The per-attempt deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The retry budget.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
