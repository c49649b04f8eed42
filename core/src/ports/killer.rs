//! Process killer port (interface).

use crate::error::Result;

/// What happened when a signal was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// The signal was delivered. The process may still be shutting down.
    Signalled,
    /// The process was already gone.
    AlreadyExited,
}

/// Port for killing processes.
///
/// This trait defines the interface for process termination.
/// Implementations handle platform-specific signal handling.
pub trait ProcessKillerPort: Send + Sync {
    /// Ask a process to exit (SIGTERM).
    ///
    /// `pid <= 0` is rejected without any system call.
    fn terminate(&self, pid: i32) -> Result<KillOutcome>;

    /// Kill a process unconditionally (SIGKILL).
    fn force_terminate(&self, pid: i32) -> Result<KillOutcome>;
}
