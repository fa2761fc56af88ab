//! Test doubles for the transport boundary.
//!
//! [`ScriptedTransport`] replays a fixed script, one entry per attempt, and
//! counts how many attempts were made - which is exactly what the retry
//! properties need to assert. It performs no I/O.
//!
//! # Examples
//!
//! ```rust
//! use surefetch::testing::{Script, ScriptedTransport};
//! use surefetch::{fetch, OfType, RequestSpec};
//! use serde_json::Value;
//!
//! # tokio_test::block_on(async {
//! let transport = ScriptedTransport::new(vec![
//!     Script::respond(200, r#"{"status":"green"}"#),
//! ]);
//!
//! let spec = RequestSpec::get("https://api.example.com/health");
//! let value = fetch(&transport, &spec, &OfType::<Value>::new()).await.unwrap();
//!
//! assert_eq!(value["status"], "green");
//! assert_eq!(transport.attempts(), 1);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use crate::request::RequestSpec;
use crate::transport::{Transport, TransportFault, TransportResponse};

/// One scripted reply, consumed by one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// Complete with this status and body.
    Respond {
        /// The HTTP status to return.
        status: u16,
        /// The response body.
        body: Vec<u8>,
    },
    /// Fail below the HTTP layer with this message.
    Fail(String),
    /// Never resolve. The attempt can only end when its deadline fires.
    Hang,
}

impl Script {
    /// Shorthand for [`Script::Respond`].
    pub fn respond(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Script::Respond {
            status,
            body: body.into(),
        }
    }
}

/// Transport that replays a fixed script, one entry per attempt.
///
/// Once the script is spent, the last entry repeats - a one-entry script is
/// a transport with a permanent behavior. Attempts are counted across the
/// whole life of the double.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Vec<Script>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    /// Create a transport replaying `script`.
    ///
    /// # Panics
    ///
    /// Panics if the script is empty; a transport with no behavior cannot
    /// answer an attempt.
    pub fn new(script: Vec<Script>) -> Self {
        assert!(
            !script.is_empty(),
            "ScriptedTransport needs at least one entry"
        );
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Transport that always answers with this status and body.
    pub fn respond_with(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![Script::respond(status, body)])
    }

    /// How many attempts have been made against this transport.
    pub fn attempts(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(
        &'a self,
        _spec: &'a RequestSpec,
    ) -> BoxFuture<'a, Result<TransportResponse, TransportFault>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .script
            .get(n)
            .unwrap_or_else(|| {
                self.script
                    .last()
                    .expect("script is non-empty by construction")
            })
            .clone();

        Box::pin(async move {
            match entry {
                Script::Respond { status, body } => Ok(TransportResponse::new(status, body)),
                Script::Fail(message) => Err(TransportFault::new(message)),
                Script::Hang => futures::future::pending().await,
            }
        })
    }
}
