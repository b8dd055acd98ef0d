//! Bounded retry with a fixed sleep between attempts.
//!
//! Grabs are non-blocking but contended: another client may hold the grab
//! for a moment and release it. The server offers nothing to block on, so
//! the only option is to poll with a bounded budget.

use crate::state::RunToken;
use std::thread;
use std::time::Duration;

/// How a retry loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryOutcome {
    /// An attempt returned true within the budget.
    Success,
    /// Every budgeted attempt returned false.
    Exhausted,
    /// The run token died before an attempt could succeed.
    Cancelled,
}

/// Run `attempt` up to `attempts` times, sleeping `interval` after each
/// failure. The token is checked before every attempt; a dead token aborts
/// the loop without spending the remaining budget.
pub fn with_budget<F>(
    attempts: u32,
    interval: Duration,
    token: &RunToken,
    mut attempt: F,
) -> RetryOutcome
where
    F: FnMut() -> bool,
{
    for _ in 0..attempts {
        if !token.is_live() {
            return RetryOutcome::Cancelled;
        }
        if attempt() {
            return RetryOutcome::Success;
        }
        thread::sleep(interval);
    }
    RetryOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_after_transient_contention() {
        let token = RunToken::new();
        let mut calls = 0;

        let outcome = with_budget(10, Duration::ZERO, &token, || {
            calls += 1;
            calls == 3
        });

        assert_eq!(outcome, RetryOutcome::Success);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_exhausts_exactly_the_budget() {
        let token = RunToken::new();
        let mut calls = 0;

        let outcome = with_budget(5, Duration::ZERO, &token, || {
            calls += 1;
            false
        });

        assert_eq!(outcome, RetryOutcome::Exhausted);
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_dead_token_spends_no_attempts() {
        let token = RunToken::new();
        token.cancel();
        let mut calls = 0;

        let outcome = with_budget(1000, Duration::ZERO, &token, || {
            calls += 1;
            true
        });

        assert_eq!(outcome, RetryOutcome::Cancelled);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_cancellation_mid_retry_aborts_the_loop() {
        let token = RunToken::new();
        let observer = token.clone();
        let mut calls = 0;

        let outcome = with_budget(1000, Duration::ZERO, &token, || {
            calls += 1;
            observer.cancel();
            false
        });

        assert_eq!(outcome, RetryOutcome::Cancelled);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_budget_never_attempts() {
        let token = RunToken::new();
        let mut calls = 0;

        let outcome = with_budget(0, Duration::ZERO, &token, || {
            calls += 1;
            true
        });

        assert_eq!(outcome, RetryOutcome::Exhausted);
        assert_eq!(calls, 0);
    }
}
