//! Process inspector built on `ps` and `lsof`, used on macOS.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use tracing::trace;

use crate::adapters::command::run_command;
use crate::ports::{ProcessDetails, ProcessInspector};

/// `ps -o lstart=` layout after whitespace normalization, e.g. "Mon Jan 2 15:04:05 2006".
const LSTART_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Resolves process details with one subprocess per field.
pub struct PsInspector {
    timeout: Duration,
}

impl PsInspector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run(&self, program: &str, args: &[&str]) -> Option<String> {
        match run_command(program, args, self.timeout).await {
            Ok(out) => Some(out),
            Err(e) => {
                trace!(program, error = %e, "Process detail lookup failed");
                None
            }
        }
    }

    async fn start_time(&self, pid: &str) -> Option<DateTime<Utc>> {
        let out = self.run("ps", &["-o", "lstart=", "-p", pid]).await?;
        let naive = parse_lstart(&out)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }

    async fn working_dir(&self, pid: &str) -> String {
        self.run("lsof", &["-a", "-p", pid, "-d", "cwd", "-Fn"])
            .await
            .and_then(|out| parse_lsof_cwd(&out))
            .unwrap_or_default()
    }

    async fn command(&self, pid: &str) -> String {
        self.run("ps", &["-o", "command=", "-p", pid])
            .await
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }
}

impl ProcessInspector for PsInspector {
    async fn inspect(&self, pid: i32) -> ProcessDetails {
        if pid <= 0 {
            return ProcessDetails::default();
        }
        let pid = pid.to_string();
        let (start_time, working_dir, command) = tokio::join!(
            self.start_time(&pid),
            self.working_dir(&pid),
            self.command(&pid),
        );
        ProcessDetails {
            start_time,
            working_dir,
            command,
        }
    }
}

/// Parse `ps -o lstart=` output as a local wall-clock time.
pub fn parse_lstart(output: &str) -> Option<NaiveDateTime> {
    let normalized = output.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, LSTART_FORMAT).ok()
}

/// Path from the first `n` line of `lsof -Fn` output.
pub fn parse_lsof_cwd(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix('n'))
        .filter(|path| !path.is_empty())
        .map(str::to_string)
}
