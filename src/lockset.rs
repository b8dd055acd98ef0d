//! Display-wide collection of screen guards.

use crate::display::DisplayServer;
use crate::guard::ScreenGuard;
use crate::state::RunToken;
use log::{debug, info};

/// One slot per screen of the display; a slot is empty when that screen's
/// acquisition failed. The slot count is fixed at construction.
pub struct LockSet {
    guards: Vec<Option<ScreenGuard>>,
}

impl LockSet {
    /// Try to lock every screen of the display.
    ///
    /// Screens are independent: one failure never aborts the attempts on
    /// the others. It does cancel the token, so the remaining screens fail
    /// fast instead of spinning through their retry budgets.
    pub fn acquire_all(display: &DisplayServer, token: &RunToken) -> Self {
        let screen_count = display.screen_count();
        let mut guards = Vec::with_capacity(screen_count.max(0) as usize);

        for screen in 0..screen_count {
            match ScreenGuard::acquire(display, screen, token) {
                Ok(guard) => guards.push(Some(guard)),
                Err(err) => {
                    debug!("screen {screen} not locked: {err}");
                    guards.push(None);
                }
            }
        }
        display.sync();

        let set = Self { guards };
        info!("locked {} of {} screens", set.locked_count(), screen_count);
        set
    }

    /// Number of screen slots (the display's screen count).
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Number of screens actually locked.
    pub fn locked_count(&self) -> usize {
        self.guards.iter().filter(|slot| slot.is_some()).count()
    }

    /// Release every held guard. Slots are emptied as they are released,
    /// so a second call observes nothing left to do.
    pub fn release_all(&mut self) {
        for slot in &mut self.guards {
            if let Some(mut guard) = slot.take() {
                guard.release();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_count_tracks_present_guards() {
        let set = LockSet {
            guards: vec![None, None],
        };
        assert_eq!(set.len(), 2);
        assert_eq!(set.locked_count(), 0);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_release_all_is_idempotent() {
        let mut set = LockSet {
            guards: vec![None, None, None],
        };

        set.release_all();
        set.release_all();

        // Slot count is pinned at construction; releasing empties the
        // slots but never shrinks the set.
        assert_eq!(set.len(), 3);
        assert_eq!(set.locked_count(), 0);
    }
}
