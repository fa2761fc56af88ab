//! Backoff schedule for retry waits.
//!
//! The schedule is pure data - it computes waits but never sleeps, which keeps
//! it trivially testable. The executor in [`crate::fetch`] owns the actual
//! sleeping.
//!
//! The schedule is linear: the wait before a retry is `base * attempts_made`,
//! where `attempts_made` counts the attempts already spent (1-based). The
//! first retry waits one base interval, the second two, and so on.
//!
//! # Examples
//!
//! ```rust
//! use surefetch::Backoff;
//! use std::time::Duration;
//!
//! let backoff = Backoff::default();
//!
//! assert_eq!(backoff.delay_after(1), Duration::from_millis(1000));
//! assert_eq!(backoff.delay_after(2), Duration::from_millis(2000));
//! assert_eq!(backoff.delay_after(3), Duration::from_millis(3000));
//! ```

use std::time::Duration;

/// Default base interval between retries.
pub const DEFAULT_BASE: Duration = Duration::from_millis(1000);

/// A linear backoff schedule.
///
/// The wait before re-entering the attempt loop grows by one base interval
/// per attempt already made. The growth is linear, not exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
}

impl Backoff {
    /// Create a schedule with the given base interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surefetch::Backoff;
    /// use std::time::Duration;
    ///
    /// let backoff = Backoff::new(Duration::from_millis(250));
    /// assert_eq!(backoff.delay_after(4), Duration::from_millis(1000));
    /// ```
    pub const fn new(base: Duration) -> Self {
        Self { base }
    }

    /// The base interval of this schedule.
    pub const fn base(&self) -> Duration {
        self.base
    }

    /// The wait before the next attempt, given how many attempts were
    /// already made (1-based).
    ///
    /// `delay_after(0)` is zero; the executor never asks for it because a
    /// retry is always preceded by at least one attempt.
    pub fn delay_after(&self, attempts_made: u32) -> Duration {
        self.base.saturating_mul(attempts_made)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}
