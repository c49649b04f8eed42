//! Linux process inspector reading `/proc`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::trace;

use crate::ports::{ProcessDetails, ProcessInspector};

/// Fallback when `sysconf(_SC_CLK_TCK)` is unavailable.
const DEFAULT_CLOCK_TICKS: u64 = 100;

/// Reads start time, cwd and command line from procfs.
pub struct ProcfsInspector {
    root: PathBuf,
    clock_ticks: u64,
}

impl ProcfsInspector {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Inspect a procfs tree mounted somewhere other than `/proc`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock_ticks: clock_ticks(),
        }
    }

    fn pid_dir(&self, pid: i32) -> PathBuf {
        self.root.join(pid.to_string())
    }

    async fn start_time(&self, pid_dir: &Path) -> Option<DateTime<Utc>> {
        let stat = fs::read_to_string(pid_dir.join("stat")).await.ok()?;
        let start_ticks = parse_start_ticks(&stat)?;
        let uptime = fs::read_to_string(self.root.join("uptime")).await.ok()?;
        let uptime_secs = parse_uptime_secs(&uptime)?;

        let started_secs = start_ticks as f64 / self.clock_ticks as f64;
        let age_ms = ((uptime_secs - started_secs).max(0.0) * 1000.0) as i64;
        Some(Utc::now() - chrono::Duration::milliseconds(age_ms))
    }

    async fn working_dir(&self, pid_dir: &Path) -> String {
        match fs::read_link(pid_dir.join("cwd")).await {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(e) => {
                trace!(error = %e, "cwd not readable");
                String::new()
            }
        }
    }

    async fn command(&self, pid_dir: &Path) -> String {
        fs::read(pid_dir.join("cmdline"))
            .await
            .map(|raw| parse_cmdline(&raw))
            .unwrap_or_default()
    }
}

impl Default for ProcfsInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInspector for ProcfsInspector {
    async fn inspect(&self, pid: i32) -> ProcessDetails {
        if pid <= 0 {
            return ProcessDetails::default();
        }
        let pid_dir = self.pid_dir(pid);
        let (start_time, working_dir, command) = tokio::join!(
            self.start_time(&pid_dir),
            self.working_dir(&pid_dir),
            self.command(&pid_dir),
        );
        ProcessDetails {
            start_time,
            working_dir,
            command,
        }
    }
}

fn clock_ticks() -> u64 {
    use nix::unistd::{sysconf, SysconfVar};

    match sysconf(SysconfVar::CLK_TCK) {
        Ok(Some(ticks)) if ticks > 0 => ticks as u64,
        _ => DEFAULT_CLOCK_TICKS,
    }
}

/// Extract `starttime` (field 22, in clock ticks since boot) from `/proc/<pid>/stat`.
///
/// The command name in field 2 may contain spaces and parentheses, so fields
/// are counted from the last `)`.
pub fn parse_start_ticks(stat: &str) -> Option<u64> {
    let after_comm = &stat[stat.rfind(')')? + 1..];
    // Field 3 (state) is the first one after the command name.
    after_comm.split_whitespace().nth(22 - 3)?.parse().ok()
}

/// First value of `/proc/uptime`, in seconds.
pub fn parse_uptime_secs(uptime: &str) -> Option<f64> {
    uptime.split_whitespace().next()?.parse().ok()
}

/// NUL-separated argv joined with spaces.
pub fn parse_cmdline(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .split('\0')
        .filter(|arg| !arg.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
