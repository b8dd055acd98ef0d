//! # clicklock
//!
//! A click-to-unlock screen locker for X11. Every screen of the display is
//! covered with a blank override-redirect window, the pointer and keyboard
//! are grabbed exclusively, and the first key or button press releases it
//! all again. There is no password: the lock is an input-capture and
//! visual-blanking mechanism, not an authentication mechanism.
//!
//! ## Lifecycle
//!
//! Acquisition flows top-down (supervisor → lock set → screen guard) and
//! release flows bottom-up in reverse order. A screen either ends up fully
//! locked or fully rolled back; a grab that stays contended past its retry
//! budget cancels the shared [`RunToken`] so the remaining screens fail
//! fast instead of spinning.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Lock, block until any key or button press, unlock.
//! clicklock::supervisor::run(None).expect("locking failed");
//! ```

pub mod display;
pub mod error;
pub mod guard;
pub mod lockset;
pub mod retry;
pub mod state;
pub mod supervisor;
pub mod waiter;

// Re-exports
pub use display::DisplayServer;
pub use error::{Error, Result};
pub use guard::{ColorRole, GRAB_ATTEMPTS, GRAB_INTERVAL, GrabDevice, ScreenGuard};
pub use lockset::LockSet;
pub use retry::RetryOutcome;
pub use state::RunToken;
pub use waiter::{is_unlock_event, wait_for_unlock};
