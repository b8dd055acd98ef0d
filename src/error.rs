//! Error types for the lock/unlock lifecycle.

use crate::guard::GrabDevice;
use thiserror::Error;

/// Result type alias for clicklock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locking the display.
#[derive(Debug, Error)]
pub enum Error {
    /// The X display connection could not be opened.
    #[error("cannot open display")]
    DisplayOpen,

    /// A grab retry budget ran out without the server granting the grab.
    #[error("unable to grab {device} for screen {screen}")]
    GrabExhausted { device: GrabDevice, screen: i32 },

    /// The run token died before or during acquisition.
    #[error("lock attempt cancelled")]
    Cancelled,

    /// The requested screen does not exist on this display.
    #[error("screen {0} does not exist on this display")]
    InvalidScreen(i32),

    /// Not a single screen could be locked.
    #[error("no screen could be locked")]
    NothingLocked,
}
