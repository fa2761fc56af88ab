//! Per-attempt bookkeeping: outcome classification and retry counters.
//!
//! Both types here are pure data. [`AttemptOutcome`] tags the result of one
//! network attempt at the point it happens, so retryability is a property of
//! the tag - never inferred later from error text. [`RetryState`] holds the
//! two counters a logical call needs, and nothing else; each call owns its
//! own, so concurrent calls never share mutable state.

use std::time::Duration;

use crate::transport::TransportFault;

/// What a single network attempt produced.
///
/// One outcome is made per attempt and consumed by the retry decision that
/// follows it; outcomes never outlive the attempt that created them, except
/// as the failure surfaced to the caller on exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A 2xx response. The raw body still has to survive JSON parsing and
    /// schema validation before the call succeeds.
    Success(Vec<u8>),
    /// A completed exchange with a non-2xx status.
    HttpFailure {
        /// The status the server returned.
        status: u16,
    },
    /// The per-attempt deadline elapsed before the transport finished.
    TimeoutFailure {
        /// The deadline that elapsed.
        timeout: Duration,
    },
    /// A network failure below HTTP, unrelated to the deadline.
    TransportFailure(TransportFault),
}

impl AttemptOutcome {
    /// Whether a fresh attempt could plausibly resolve this outcome.
    ///
    /// Timeouts and transport failures are transient. HTTP failures are
    /// transient only for 5xx - a 4xx reflects the request itself and will
    /// not change on retry. Whether a retry actually happens also depends on
    /// the remaining budget, which is [`RetryState`]'s concern.
    pub fn is_retryable(&self) -> bool {
        match self {
            AttemptOutcome::Success(_) => false,
            AttemptOutcome::HttpFailure { status } => (500..600).contains(status),
            AttemptOutcome::TimeoutFailure { .. } => true,
            AttemptOutcome::TransportFailure(_) => true,
        }
    }
}

/// Attempt counters for one logical call.
///
/// Holds the invariant `attempts_made + retries_remaining == max_retries + 1`
/// from construction until the loop exits: the budget covers the mandatory
/// first attempt plus `max_retries` retries, and every recorded attempt
/// moves one unit from remaining to made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempts_made: u32,
    retries_remaining: u32,
}

impl RetryState {
    /// Fresh counters for a call with the given retry budget.
    pub fn new(max_retries: u32) -> Self {
        Self {
            attempts_made: 0,
            retries_remaining: max_retries.saturating_add(1),
        }
    }

    /// Record that one attempt was spent.
    pub fn record_attempt(&mut self) {
        debug_assert!(self.retries_remaining > 0, "attempt made past the budget");
        self.attempts_made += 1;
        self.retries_remaining -= 1;
    }

    /// How many attempts were made so far (1-based after the first).
    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// How many attempts remain in the budget.
    pub fn retries_remaining(&self) -> u32 {
        self.retries_remaining
    }

    /// Whether a retry is still within budget.
    pub fn can_retry(&self) -> bool {
        self.retries_remaining > 0
    }
}

#[cfg(test)]
mod attempt_tests {
    use super::*;

    #[test]
    fn test_retryability_by_tag() {
        assert!(!AttemptOutcome::Success(Vec::new()).is_retryable());
        assert!(AttemptOutcome::HttpFailure { status: 500 }.is_retryable());
        assert!(AttemptOutcome::HttpFailure { status: 503 }.is_retryable());
        assert!(!AttemptOutcome::HttpFailure { status: 404 }.is_retryable());
        assert!(!AttemptOutcome::HttpFailure { status: 301 }.is_retryable());
        assert!(AttemptOutcome::TimeoutFailure {
            timeout: Duration::from_millis(50)
        }
        .is_retryable());
        assert!(AttemptOutcome::TransportFailure(TransportFault::new("dns")).is_retryable());
    }

    #[test]
    fn test_state_counts_down_the_budget() {
        let mut state = RetryState::new(2);
        assert_eq!(state.attempts_made(), 0);
        assert_eq!(state.retries_remaining(), 3);

        state.record_attempt();
        assert_eq!(state.attempts_made(), 1);
        assert_eq!(state.retries_remaining(), 2);
        assert!(state.can_retry());

        state.record_attempt();
        state.record_attempt();
        assert_eq!(state.attempts_made(), 3);
        assert!(!state.can_retry());
    }

    #[test]
    fn test_zero_budget_allows_exactly_one_attempt() {
        let mut state = RetryState::new(0);
        assert!(state.can_retry());

        state.record_attempt();
        assert_eq!(state.attempts_made(), 1);
        assert!(!state.can_retry());
    }

    #[test]
    fn test_invariant_holds_throughout() {
        let max_retries = 4;
        let mut state = RetryState::new(max_retries);

        for _ in 0..=max_retries {
            assert_eq!(
                state.attempts_made() + state.retries_remaining(),
                max_retries + 1
            );
            state.record_attempt();
        }
        assert_eq!(
            state.attempts_made() + state.retries_remaining(),
            max_retries + 1
        );
    }
}
