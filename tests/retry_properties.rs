//! Property tests for the pure core: backoff arithmetic, retry counters,
//! and outcome classification.

use std::time::Duration;

use proptest::prelude::*;
use surefetch::{AttemptOutcome, Backoff, RetryState, TransportFault};

proptest! {
    #[test]
    fn backoff_is_linear_in_attempts_made(
        base_ms in 0u64..10_000,
        attempts_made in 0u32..1_000,
    ) {
        let backoff = Backoff::new(Duration::from_millis(base_ms));
        prop_assert_eq!(
            backoff.delay_after(attempts_made),
            Duration::from_millis(base_ms * u64::from(attempts_made))
        );
    }

    #[test]
    fn retry_state_invariant_holds_for_any_budget(max_retries in 0u32..500) {
        let mut state = RetryState::new(max_retries);

        for _ in 0..=max_retries {
            prop_assert_eq!(
                state.attempts_made() + state.retries_remaining(),
                max_retries + 1
            );
            prop_assert!(state.can_retry());
            state.record_attempt();
        }

        // The budget covers exactly max_retries + 1 attempts.
        prop_assert_eq!(state.attempts_made(), max_retries + 1);
        prop_assert!(!state.can_retry());
    }

    #[test]
    fn only_server_errors_are_retryable_statuses(status in 100u16..600) {
        let outcome = AttemptOutcome::HttpFailure { status };
        prop_assert_eq!(outcome.is_retryable(), (500..600).contains(&status));
    }

    #[test]
    fn timeouts_and_faults_are_always_retryable(
        timeout_ms in 1u64..60_000,
        message in ".{0,40}",
    ) {
        let timeout = AttemptOutcome::TimeoutFailure {
            timeout: Duration::from_millis(timeout_ms),
        };
        let fault = AttemptOutcome::TransportFailure(TransportFault::new(message));

        prop_assert!(timeout.is_retryable());
        prop_assert!(fault.is_retryable());
    }
}
