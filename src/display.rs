//! Owned wrapper around the Xlib display connection.

use crate::error::{Error, Result};
use std::mem;
use std::os::raw::c_int;
use std::ptr::null;
use x11::xlib;

/// An open X display connection, closed on drop.
///
/// Everything the lock lifecycle needs from the server goes through this
/// handle; `raw` is exposed for the window/grab calls in [`crate::guard`],
/// which must not outlive the handle.
pub struct DisplayServer {
    raw: *mut xlib::Display,
}

impl DisplayServer {
    /// Connect to the display named by `DISPLAY`.
    pub fn open() -> Result<Self> {
        let raw = unsafe { xlib::XOpenDisplay(null()) };
        if raw.is_null() {
            return Err(Error::DisplayOpen);
        }
        Ok(Self { raw })
    }

    /// The underlying Xlib connection pointer.
    pub fn raw(&self) -> *mut xlib::Display {
        self.raw
    }

    /// Number of screens the display exposes.
    pub fn screen_count(&self) -> i32 {
        unsafe { xlib::XScreenCount(self.raw) }
    }

    /// Root window of one screen.
    pub fn root_window(&self, screen: i32) -> xlib::Window {
        unsafe { xlib::XRootWindow(self.raw, screen) }
    }

    /// Flush the request queue and wait for the server to process it.
    pub fn sync(&self) {
        unsafe {
            xlib::XSync(self.raw, xlib::False);
        }
    }

    /// Block until the next event arrives on this connection and return
    /// its type code. The event itself is consumed; the lock lifecycle
    /// only ever dispatches on the type.
    pub fn next_event_type(&self) -> c_int {
        unsafe {
            let mut event: xlib::XEvent = mem::zeroed();
            xlib::XNextEvent(self.raw, &mut event);
            event.type_
        }
    }
}

impl Drop for DisplayServer {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.raw);
        }
    }
}
