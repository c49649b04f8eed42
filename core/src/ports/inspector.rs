//! Process inspector port (interface).

use chrono::{DateTime, Utc};

/// Per-process details resolved for a listening port.
///
/// Every field is independent and best-effort; an unresolved field keeps its
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessDetails {
    /// When the process started.
    pub start_time: Option<DateTime<Utc>>,
    /// Current working directory.
    pub working_dir: String,
    /// Full command line.
    pub command: String,
}

/// Port for resolving process details by PID.
pub trait ProcessInspector: Send + Sync {
    /// Resolve start time, working directory and command line for `pid`.
    ///
    /// Never fails: anything that cannot be read is left empty.
    fn inspect(&self, pid: i32) -> impl std::future::Future<Output = ProcessDetails> + Send;
}
