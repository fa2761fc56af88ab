//! # Surefetch
//!
//! Resilient typed JSON requests: one logical call, per-attempt deadlines,
//! a bounded linear retry budget, and schema-checked response payloads.
//!
//! ## Shape of a call
//!
//! [`fetch`] wraps a single request against a JSON endpoint. Each attempt
//! races the [`Transport`] against a fresh deadline; failures are classified
//! as transient (timeout, 5xx, network fault) or terminal (4xx, malformed or
//! schema-mismatched body) at the point they occur. Transient failures are
//! retried with a linearly growing wait until the budget runs out, and on
//! exhaustion the caller receives the last attempt's own failure - never a
//! wrapper around it.
//!
//! The crate implements no HTTP itself: the [`Transport`] trait is the seam
//! where a real client (or the [`testing`] doubles) plugs in, and the
//! [`Schema`] trait is the seam for payload validation - any
//! `serde::Deserialize` type is a schema via [`OfType`].
//!
//! ## Quick example
//!
//! ```rust
//! use surefetch::testing::ScriptedTransport;
//! use surefetch::{fetch, OfType, RequestSpec};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Health {
//!     status: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let transport = ScriptedTransport::respond_with(200, r#"{"status":"green"}"#);
//!
//! let spec = RequestSpec::get("https://api.example.com/health");
//! let health = fetch(&transport, &spec, &OfType::<Health>::new())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(health.status, "green");
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod attempt;
pub mod backoff;
pub mod error;
pub mod fetch;
pub mod request;
pub mod schema;
pub mod testing;
pub mod transport;

// Re-exports
pub use attempt::{AttemptOutcome, RetryState};
pub use backoff::Backoff;
pub use error::{FetchError, Malformed};
pub use fetch::{fetch, fetch_with_hook, RetryEvent};
pub use request::{RequestSpec, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
pub use schema::{OfType, Schema, SchemaFn, SchemaViolation};
pub use transport::{Transport, TransportFault, TransportResponse};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{FetchError, Malformed};
    pub use crate::fetch::{fetch, fetch_with_hook, RetryEvent};
    pub use crate::request::RequestSpec;
    pub use crate::schema::{OfType, Schema, SchemaFn, SchemaViolation};
    pub use crate::transport::{Transport, TransportFault, TransportResponse};
}
