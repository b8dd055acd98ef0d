//! Shared run token coordinating the grab retry loops and the event wait.
//!
//! The token is the only cross-operation mutable state in the program. It is
//! written at exactly two points: a grab retry budget running out (`cancel`)
//! and a qualifying unlock event arriving (`cancel`, after `wait` re-armed
//! it). Retry loops read it every iteration so a failure anywhere stops
//! acquisition everywhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation token; all clones observe the same flag.
#[derive(Clone, Debug)]
pub struct RunToken(Arc<AtomicBool>);

impl RunToken {
    /// Create a live token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the program should keep operating.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Signal termination: retry loops abort at their next check and the
    /// event wait exits its loop.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Re-arm the token. Entering the event wait always re-arms,
    /// regardless of why the token was cancelled earlier.
    #[inline]
    pub fn rearm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Default for RunToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_live() {
        let token = RunToken::new();
        assert!(token.is_live());
    }

    #[test]
    fn test_cancel_is_visible_to_clones() {
        let token = RunToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(!token.is_live());
        assert!(!clone.is_live());
    }

    #[test]
    fn test_rearm_restores_a_cancelled_token() {
        let token = RunToken::new();

        token.cancel();
        assert!(!token.is_live());

        token.rearm();
        assert!(token.is_live());

        // Re-arming a live token is a no-op.
        token.rearm();
        assert!(token.is_live());
    }
}
