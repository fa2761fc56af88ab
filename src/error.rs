//! The failure taxonomy callers receive.
//!
//! Transient kinds are retried inside the executor; whatever reaches the
//! caller is final, and it is always the last attempt's own failure - never
//! a generic "retries exhausted" wrapper. The `attempts` field on the
//! transient kinds says how many transport attempts the call spent before
//! giving up.

use std::time::Duration;

use crate::schema::SchemaViolation;
use crate::transport::TransportFault;

/// Terminal failure of one logical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The per-attempt deadline elapsed, and it was still elapsing on the
    /// final attempt.
    TimeoutExceeded {
        /// The deadline each attempt was given.
        timeout: Duration,
        /// Total transport attempts made.
        attempts: u32,
    },
    /// A 5xx that was retried until the budget ran out.
    RetryableHttpError {
        /// The status the final attempt returned.
        status: u16,
        /// Total transport attempts made.
        attempts: u32,
    },
    /// A non-retryable status: 4xx, or 5xx when the call had no retry
    /// budget at all. Reported on first occurrence, never retried.
    TerminalHttpError {
        /// The status the server returned.
        status: u16,
    },
    /// The 2xx body was rejected. Never retried - a malformed or
    /// schema-mismatched payload will not change on replay.
    MalformedResponse(Malformed),
    /// A network failure below HTTP, still present on the final attempt.
    TransportError {
        /// The fault from the final attempt.
        fault: TransportFault,
        /// Total transport attempts made.
        attempts: u32,
    },
}

/// Why a 2xx body was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// The body was not parseable as JSON.
    Json {
        /// The parser's reason.
        reason: String,
    },
    /// The body parsed, but failed schema validation.
    Schema(SchemaViolation),
}

impl FetchError {
    /// The HTTP status involved, for the two HTTP kinds.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RetryableHttpError { status, .. }
            | FetchError::TerminalHttpError { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is the timeout kind.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::TimeoutExceeded { .. })
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::TimeoutExceeded { timeout, attempts } => {
                write!(
                    f,
                    "deadline of {:?} exceeded on each of {} attempts",
                    timeout, attempts
                )
            }
            FetchError::RetryableHttpError { status, attempts } => {
                write!(
                    f,
                    "server error {} persisted through {} attempts",
                    status, attempts
                )
            }
            FetchError::TerminalHttpError { status } => {
                write!(f, "http error {}", status)
            }
            FetchError::MalformedResponse(malformed) => {
                write!(f, "malformed response: {}", malformed)
            }
            FetchError::TransportError { fault, attempts } => {
                write!(f, "{} (after {} attempts)", fault, attempts)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::TransportError { fault, .. } => Some(fault),
            FetchError::MalformedResponse(Malformed::Schema(violation)) => Some(violation),
            _ => None,
        }
    }
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::Json { reason } => write!(f, "body is not JSON: {}", reason),
            Malformed::Schema(violation) => write!(f, "{}", violation),
        }
    }
}
