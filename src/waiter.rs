//! Blocking wait for the unlock-triggering input event.

use crate::display::DisplayServer;
use crate::state::RunToken;
use log::debug;
use std::os::raw::c_int;
use x11::xlib;

/// Whether an event of this type unlocks the screen.
///
/// Any key press or button press qualifies; everything else (motion,
/// releases, the substructure notifications selected during acquisition)
/// is consumed and ignored.
pub fn is_unlock_event(event_type: c_int) -> bool {
    event_type == xlib::KeyPress || event_type == xlib::ButtonPress
}

/// Block until a qualifying input event arrives anywhere on the display.
///
/// Entering the wait always re-arms the token; the qualifying event
/// cancels it again on the way out. This is the program's single
/// suspension point and has no timeout.
pub fn wait_for_unlock(display: &DisplayServer, token: &RunToken) {
    token.rearm();
    while token.is_live() {
        if is_unlock_event(display.next_event_type()) {
            debug!("unlock event received");
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_and_button_presses_unlock() {
        assert!(is_unlock_event(xlib::KeyPress));
        assert!(is_unlock_event(xlib::ButtonPress));
    }

    #[test]
    fn test_other_events_are_ignored() {
        assert!(!is_unlock_event(xlib::KeyRelease));
        assert!(!is_unlock_event(xlib::ButtonRelease));
        assert!(!is_unlock_event(xlib::MotionNotify));
        assert!(!is_unlock_event(xlib::CreateNotify));
        assert!(!is_unlock_event(xlib::DestroyNotify));
        assert!(!is_unlock_event(xlib::MapNotify));
        assert!(!is_unlock_event(xlib::Expose));
    }
}
