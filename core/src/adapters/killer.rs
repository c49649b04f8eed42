//! Process killer adapter using POSIX signals.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ports::{KillOutcome, ProcessKillerPort};

/// Sends SIGTERM/SIGKILL to a process.
pub struct ProcessKiller;

impl ProcessKiller {
    pub fn new() -> Self {
        Self
    }

    fn signal(&self, pid: i32, force: bool) -> Result<KillOutcome> {
        if pid <= 0 {
            warn!(pid, "Refusing to signal invalid PID");
            return Err(Error::InvalidPid(pid));
        }
        let outcome = send_signal(pid, force)?;
        info!(pid, force, ?outcome, "Signal sent");
        Ok(outcome)
    }
}

impl Default for ProcessKiller {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessKillerPort for ProcessKiller {
    fn terminate(&self, pid: i32) -> Result<KillOutcome> {
        self.signal(pid, false)
    }

    fn force_terminate(&self, pid: i32) -> Result<KillOutcome> {
        self.signal(pid, true)
    }
}

#[cfg(unix)]
fn send_signal(pid: i32, force: bool) -> Result<KillOutcome> {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let signal = if force { Signal::SIGKILL } else { Signal::SIGTERM };
    debug!(pid, ?signal, "Sending signal");

    match kill(Pid::from_raw(pid), signal) {
        Ok(()) => Ok(KillOutcome::Signalled),
        Err(Errno::ESRCH) => Ok(KillOutcome::AlreadyExited),
        Err(Errno::EPERM) => Err(Error::PermissionDenied(format!(
            "PID {pid} belongs to another user; re-run tapas with sudo to kill it"
        ))),
        Err(errno) => Err(Error::KillFailed {
            pid,
            reason: errno.desc().to_string(),
        }),
    }
}

#[cfg(not(unix))]
fn send_signal(_pid: i32, _force: bool) -> Result<KillOutcome> {
    Err(Error::UnsupportedPlatform(
        "Process signals are only available on Unix".to_string(),
    ))
}
