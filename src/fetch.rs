//! The resilient request executor.
//!
//! [`fetch`] wraps one logical request: each attempt races the transport
//! against a fresh full deadline, the outcome is classified at the point of
//! failure, transient outcomes are retried after a linear backoff wait until
//! the budget runs out, and a 2xx body must survive JSON parsing plus schema
//! validation before the caller sees a value.
//!
//! Retries re-enter through an explicit loop with counters local to the
//! call, so concurrent calls share nothing and the stack stays flat no
//! matter the budget.
//!
//! # Examples
//!
//! Recovering from a transient transport failure:
//!
//! ```rust
//! use surefetch::testing::{Script, ScriptedTransport};
//! use surefetch::{fetch, OfType, RequestSpec};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Greeting {
//!     message: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let transport = ScriptedTransport::new(vec![
//!     Script::Fail("connection reset".to_string()),
//!     Script::respond(200, r#"{"message":"ok"}"#),
//! ]);
//!
//! let spec = RequestSpec::get("https://api.example.com/greeting").with_max_retries(1);
//!
//! let greeting = fetch(&transport, &spec, &OfType::<Greeting>::new())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(greeting.message, "ok");
//! assert_eq!(transport.attempts(), 2);
//! # });
//! ```

use std::time::Duration;

use tracing::warn;

use crate::attempt::{AttemptOutcome, RetryState};
use crate::backoff::Backoff;
use crate::error::{FetchError, Malformed};
use crate::request::RequestSpec;
use crate::schema::Schema;
use crate::transport::Transport;

/// Diagnostic snapshot emitted before each retry sleep.
///
/// Advisory only - it feeds logging and metrics hooks, and plays no part in
/// the success/failure contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryEvent {
    /// 1-based count of attempts already made.
    pub attempt: u32,
    /// Attempts left in the budget after the one that just failed.
    pub retries_remaining: u32,
    /// How long the call sleeps before re-entering.
    pub wait: Duration,
}

/// Execute one logical request, returning the schema-validated value.
///
/// Equivalent to [`fetch_with_hook`] with a no-op hook; retry diagnostics
/// still go to `tracing`.
pub async fn fetch<X, S>(
    transport: &X,
    spec: &RequestSpec,
    schema: &S,
) -> Result<S::Output, FetchError>
where
    X: Transport + ?Sized,
    S: Schema,
{
    fetch_with_hook(transport, spec, schema, |_| {}).await
}

/// Execute one logical request, invoking `on_retry` before each retry sleep.
///
/// The hook is synchronous and should not block; use it for logging,
/// metrics, or test assertions about the retry sequence.
///
/// # Examples
///
/// ```rust
/// use surefetch::testing::{Script, ScriptedTransport};
/// use surefetch::{fetch_with_hook, OfType, RequestSpec};
/// use serde_json::Value;
/// use std::sync::Mutex;
///
/// # tokio_test::block_on(async {
/// let transport = ScriptedTransport::new(vec![
///     Script::respond(500, "busy"),
///     Script::respond(200, "{}"),
/// ]);
/// let spec = RequestSpec::get("https://api.example.com").with_max_retries(1);
///
/// let waits = Mutex::new(Vec::new());
/// let _ = fetch_with_hook(&transport, &spec, &OfType::<Value>::new(), |event| {
///     waits.lock().unwrap().push(event.wait);
/// })
/// .await;
///
/// assert_eq!(waits.lock().unwrap().len(), 1);
/// # });
/// ```
pub async fn fetch_with_hook<X, S, H>(
    transport: &X,
    spec: &RequestSpec,
    schema: &S,
    on_retry: H,
) -> Result<S::Output, FetchError>
where
    X: Transport + ?Sized,
    S: Schema,
    H: Fn(&RetryEvent),
{
    let backoff = Backoff::default();
    let mut state = RetryState::new(spec.max_retries());

    loop {
        state.record_attempt();

        let outcome = run_attempt(transport, spec).await;
        let retry_now = outcome.is_retryable() && state.can_retry();

        match outcome {
            AttemptOutcome::Success(body) => return decode(&body, schema),
            AttemptOutcome::TimeoutFailure { timeout } if !retry_now => {
                return Err(FetchError::TimeoutExceeded {
                    timeout,
                    attempts: state.attempts_made(),
                });
            }
            AttemptOutcome::HttpFailure { status } if !retry_now => {
                return Err(http_error(status, &state));
            }
            AttemptOutcome::TransportFailure(fault) if !retry_now => {
                return Err(FetchError::TransportError {
                    fault,
                    attempts: state.attempts_made(),
                });
            }
            _ => {} // transient, budget remains
        }

        let event = RetryEvent {
            attempt: state.attempts_made(),
            retries_remaining: state.retries_remaining(),
            wait: backoff.delay_after(state.attempts_made()),
        };
        warn!(
            url = spec.url(),
            attempt = event.attempt,
            retries_remaining = event.retries_remaining,
            wait_ms = event.wait.as_millis() as u64,
            "attempt failed, retrying after backoff"
        );
        on_retry(&event);
        tokio::time::sleep(event.wait).await;
    }
}

/// Run one attempt: the transport raced against a fresh deadline.
///
/// Dropping the transport future when the deadline wins is what cancels the
/// in-flight exchange; when the transport wins, the timer is dropped with
/// the race. Exactly one side ever progresses the state machine.
async fn run_attempt<X>(transport: &X, spec: &RequestSpec) -> AttemptOutcome
where
    X: Transport + ?Sized,
{
    let deadline = spec.timeout();
    match tokio::time::timeout(deadline, transport.send(spec)).await {
        Err(_) => AttemptOutcome::TimeoutFailure { timeout: deadline },
        Ok(Err(fault)) => AttemptOutcome::TransportFailure(fault),
        Ok(Ok(response)) => {
            if response.is_success() {
                AttemptOutcome::Success(response.into_body())
            } else {
                AttemptOutcome::HttpFailure {
                    status: response.status(),
                }
            }
        }
    }
}

/// Parse and validate a 2xx body. Both failure modes are terminal.
fn decode<S: Schema>(body: &[u8], schema: &S) -> Result<S::Output, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedResponse(Malformed::Json {
            reason: e.to_string(),
        }))?;

    schema
        .validate(&value)
        .map_err(|violation| FetchError::MalformedResponse(Malformed::Schema(violation)))
}

/// Map a non-2xx status on a non-retried attempt to its terminal kind.
///
/// A 5xx that the call actually retried surfaces as the retryable kind with
/// exhaustion metadata; a 5xx with no budget at all, like any 4xx, is
/// terminal on first occurrence.
fn http_error(status: u16, state: &RetryState) -> FetchError {
    if (500..600).contains(&status) && state.attempts_made() > 1 {
        FetchError::RetryableHttpError {
            status,
            attempts: state.attempts_made(),
        }
    } else {
        FetchError::TerminalHttpError { status }
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::*;
    use crate::schema::OfType;
    use crate::testing::{Script, ScriptedTransport};
    use serde_json::Value;

    fn spec() -> RequestSpec {
        RequestSpec::get("https://api.example.com/resource")
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt_makes_one_call() {
        let transport = ScriptedTransport::respond_with(200, r#"{"ok":true}"#);

        let value = fetch(&transport, &spec(), &OfType::<Value>::new())
            .await
            .unwrap();

        assert_eq!(value["ok"], Value::Bool(true));
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_json_is_terminal_on_first_attempt() {
        let transport = ScriptedTransport::respond_with(200, "not json at all");
        let spec = spec().with_max_retries(3);

        let err = fetch(&transport, &spec, &OfType::<Value>::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::MalformedResponse(Malformed::Json { .. })
        ));
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_four_oh_four_is_terminal_despite_budget() {
        let transport = ScriptedTransport::respond_with(404, "missing");
        let spec = spec().with_max_retries(3);

        let err = fetch(&transport, &spec, &OfType::<Value>::new())
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::TerminalHttpError { status: 404 });
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_without_budget_is_terminal() {
        let transport = ScriptedTransport::respond_with(500, "boom");
        let spec = spec().with_max_retries(0);

        let err = fetch(&transport, &spec, &OfType::<Value>::new())
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::TerminalHttpError { status: 500 });
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_server_errors_surface_the_retryable_kind() {
        let transport = ScriptedTransport::respond_with(503, "busy");
        let spec = spec().with_max_retries(2);

        let err = fetch(&transport, &spec, &OfType::<Value>::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FetchError::RetryableHttpError {
                status: 503,
                attempts: 3
            }
        );
        assert_eq!(transport.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_fault_surfaces_with_attempt_count() {
        let transport = ScriptedTransport::new(vec![Script::Fail("dns failure".to_string())]);
        let spec = spec().with_max_retries(1);

        let err = fetch(&transport, &spec, &OfType::<Value>::new())
            .await
            .unwrap_err();

        match err {
            FetchError::TransportError { fault, attempts } => {
                assert_eq!(fault.message(), "dns failure");
                assert_eq!(attempts, 2);
            }
            other => panic!("expected TransportError, got {:?}", other),
        }
    }
}
