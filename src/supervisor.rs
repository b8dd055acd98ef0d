//! Top-level orchestration of one lock/unlock cycle.

use crate::display::DisplayServer;
use crate::error::{Error, Result};
use crate::lockset::LockSet;
use crate::state::RunToken;
use crate::waiter;
use log::{debug, error};
use std::ffi::OsString;
use std::process::{Command, Stdio};

/// Run a full cycle: open the display, lock every screen, optionally spawn
/// the companion command, wait for the unlock event, release everything.
///
/// Locking counts as successful when at least one screen is protected; if
/// none is, nothing is released and [`Error::NothingLocked`] is returned.
pub fn run(companion: Option<&[OsString]>) -> Result<()> {
    let display = DisplayServer::open()?;
    let token = RunToken::new();

    let mut locks = LockSet::acquire_all(&display, &token);
    if locks.locked_count() == 0 {
        return Err(Error::NothingLocked);
    }

    if let Some(argv) = companion {
        spawn_companion(argv);
    }

    waiter::wait_for_unlock(&display, &token);

    locks.release_all();
    display.sync();
    Ok(())
}

/// Start the companion command as a detached, fire-and-forget child.
/// The parent never waits on it and a spawn failure does not interrupt
/// the lock.
fn spawn_companion(argv: &[OsString]) {
    let Some((program, args)) = argv.split_first() else {
        return;
    };
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .spawn()
    {
        Ok(child) => debug!("companion {program:?} running as pid {}", child.id()),
        Err(err) => error!("failed to spawn companion {program:?}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_companion_without_argv_is_a_no_op() {
        spawn_companion(&[]);
    }

    #[test]
    fn test_spawn_companion_survives_missing_program() {
        // Spawn failure is reported, not propagated.
        spawn_companion(&[OsString::from("/nonexistent/clicklock-companion")]);
    }
}
