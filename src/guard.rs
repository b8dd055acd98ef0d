//! Per-screen lock guard: blanking window, invisible cursor, and the
//! exclusive pointer/keyboard grabs.
//!
//! A guard is all-or-nothing. `acquire` either returns a fully grabbed,
//! fully blanked screen or rolls every resource back before reporting the
//! failure. `release` is idempotent and also runs on drop, so no exit path
//! can leak a partially locked screen.

use crate::display::DisplayServer;
use crate::error::{Error, Result};
use crate::retry::{self, RetryOutcome};
use crate::state::RunToken;
use log::{debug, error, warn};
use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::os::raw::{c_char, c_int, c_uint, c_ulong};
use std::time::Duration;
use x11::xlib;

/// Attempt budget for each input grab.
pub const GRAB_ATTEMPTS: u32 = 1000;

/// Spacing between grab attempts.
pub const GRAB_INTERVAL: Duration = Duration::from_millis(1);

/// Which input device a grab targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabDevice {
    Pointer,
    Keyboard,
}

impl fmt::Display for GrabDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrabDevice::Pointer => f.write_str("pointer"),
            GrabDevice::Keyboard => f.write_str("keyboard"),
        }
    }
}

/// Roles of the colors allocated per screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorRole {
    /// Window background after initialization.
    Init,
    /// Reserved for input feedback.
    Input,
    /// Reserved for failure feedback.
    Failed,
}

impl ColorRole {
    pub const COUNT: usize = 3;
    pub const ALL: [ColorRole; Self::COUNT] = [ColorRole::Init, ColorRole::Input, ColorRole::Failed];

    /// X11 color name this role is allocated from.
    pub fn color_name(self) -> &'static CStr {
        match self {
            ColorRole::Init => c"black",
            ColorRole::Input => c"#005577",
            ColorRole::Failed => c"#CC3333",
        }
    }
}

/// One screen's share of the lock: its blanking window, cursor, pixmap,
/// allocated colors, and the input grabs held on its root window.
///
/// Owned by [`crate::lockset::LockSet`]; must be released (or dropped)
/// before the [`DisplayServer`] it was acquired from closes.
pub struct ScreenGuard {
    screen: i32,
    display: *mut xlib::Display,
    root: xlib::Window,
    window: xlib::Window,
    pixmap: xlib::Pixmap,
    cursor: xlib::Cursor,
    colors: [c_ulong; ColorRole::COUNT],
    keyboard_grabbed: bool,
    released: bool,
}

impl ScreenGuard {
    /// Blank `screen` and take exclusive ownership of its input.
    ///
    /// Grab failures cancel the token so sibling screens stop retrying,
    /// then roll back everything acquired here before returning the error.
    pub fn acquire(display: &DisplayServer, screen: i32, token: &RunToken) -> Result<Self> {
        if !token.is_live() {
            return Err(Error::Cancelled);
        }
        if screen < 0 || screen >= display.screen_count() {
            return Err(Error::InvalidScreen(screen));
        }

        let dpy = display.raw();
        let root = display.root_window(screen);
        let colors = alloc_colors(dpy, screen);

        let (window, pixmap, cursor) = unsafe {
            let width = xlib::XDisplayWidth(dpy, screen) as c_uint;
            let height = xlib::XDisplayHeight(dpy, screen) as c_uint;

            let mut attrs: xlib::XSetWindowAttributes = mem::zeroed();
            attrs.override_redirect = xlib::True;
            attrs.background_pixel = colors[ColorRole::Init as usize];
            let window = xlib::XCreateWindow(
                dpy,
                root,
                0,
                0,
                width,
                height,
                0,
                xlib::XDefaultDepth(dpy, screen),
                xlib::CopyFromParent as c_uint,
                xlib::XDefaultVisual(dpy, screen),
                xlib::CWOverrideRedirect | xlib::CWBackPixel,
                &mut attrs,
            );

            // 8x8 all-zero bitmap: both cursor planes blank, so the
            // pointer disappears over the lock window.
            let bits: [c_char; 8] = [0; 8];
            let pixmap = xlib::XCreateBitmapFromData(dpy, window, bits.as_ptr(), 8, 8);
            let mut fg: xlib::XColor = mem::zeroed();
            let mut bg: xlib::XColor = mem::zeroed();
            let cursor = xlib::XCreatePixmapCursor(dpy, pixmap, pixmap, &mut fg, &mut bg, 0, 0);
            xlib::XDefineCursor(dpy, window, cursor);
            xlib::XMapRaised(dpy, window);

            (window, pixmap, cursor)
        };

        let mut guard = ScreenGuard {
            screen,
            display: dpy,
            root,
            window,
            pixmap,
            cursor,
            colors,
            keyboard_grabbed: false,
            released: false,
        };

        let pointer = retry::with_budget(GRAB_ATTEMPTS, GRAB_INTERVAL, token, || unsafe {
            xlib::XGrabPointer(
                dpy,
                root,
                xlib::False,
                (xlib::ButtonPressMask | xlib::ButtonReleaseMask | xlib::PointerMotionMask) as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0,
                cursor,
                xlib::CurrentTime,
            ) == xlib::GrabSuccess
        });
        if pointer != RetryOutcome::Success {
            return Err(guard.abort(token, GrabDevice::Pointer, pointer));
        }

        let keyboard = retry::with_budget(GRAB_ATTEMPTS, GRAB_INTERVAL, token, || unsafe {
            xlib::XGrabKeyboard(
                dpy,
                root,
                xlib::True,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                xlib::CurrentTime,
            ) == xlib::GrabSuccess
        });
        if keyboard != RetryOutcome::Success {
            return Err(guard.abort(token, GrabDevice::Keyboard, keyboard));
        }
        guard.keyboard_grabbed = true;

        unsafe {
            xlib::XSelectInput(dpy, guard.root, xlib::SubstructureNotifyMask);
        }

        debug!("screen {screen} locked");
        Ok(guard)
    }

    /// Screen this guard blanks.
    pub fn screen(&self) -> i32 {
        self.screen
    }

    /// Let go of everything this guard holds, in fixed order: input grabs,
    /// colors, pixmap and cursor, then the window itself. Each step is
    /// best-effort so the remaining steps always run. Calling this on an
    /// already released guard does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        unsafe {
            if self.keyboard_grabbed {
                xlib::XUngrabKeyboard(self.display, xlib::CurrentTime);
            }
            xlib::XUngrabPointer(self.display, xlib::CurrentTime);
            xlib::XFreeColors(
                self.display,
                xlib::XDefaultColormap(self.display, self.screen),
                self.colors.as_mut_ptr(),
                ColorRole::COUNT as c_int,
                0,
            );
            xlib::XFreePixmap(self.display, self.pixmap);
            xlib::XFreeCursor(self.display, self.cursor);
            xlib::XDestroyWindow(self.display, self.window);
        }
        debug!("screen {} released", self.screen);
    }

    /// Grab failure path: report, cancel the token, roll this screen back.
    fn abort(mut self, token: &RunToken, device: GrabDevice, outcome: RetryOutcome) -> Error {
        let err = if outcome == RetryOutcome::Cancelled {
            debug!("{device} grab on screen {} aborted by cancellation", self.screen);
            Error::Cancelled
        } else {
            error!("unable to grab {device} for screen {}", self.screen);
            Error::GrabExhausted {
                device,
                screen: self.screen,
            }
        };
        token.cancel();
        self.release();
        err
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Allocate the per-role colors from the screen's default colormap.
/// Allocation failure falls back to the screen's black pixel.
fn alloc_colors(dpy: *mut xlib::Display, screen: i32) -> [c_ulong; ColorRole::COUNT] {
    let colormap = unsafe { xlib::XDefaultColormap(dpy, screen) };
    let mut pixels = [0; ColorRole::COUNT];
    for role in ColorRole::ALL {
        let mut closest: xlib::XColor = unsafe { mem::zeroed() };
        let mut exact: xlib::XColor = unsafe { mem::zeroed() };
        let status = unsafe {
            xlib::XAllocNamedColor(
                dpy,
                colormap,
                role.color_name().as_ptr(),
                &mut closest,
                &mut exact,
            )
        };
        pixels[role as usize] = if status != 0 {
            closest.pixel
        } else {
            warn!("color {:?} unavailable on screen {screen}", role.color_name());
            unsafe { xlib::XBlackPixel(dpy, screen) }
        };
    }
    pixels
}
