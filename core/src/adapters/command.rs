//! Subprocess execution shared by the adapters.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Upper bound for a single external command unless configured otherwise.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a command under `LC_ALL=C` and return its stdout.
///
/// The child is killed if it outlives `timeout`. A non-zero exit status only
/// counts as failure when stdout is empty and stderr explains why: `lsof`
/// exits 1 when nothing matches, which is an empty result, not an error.
pub async fn run_command(program: &str, args: &[&str], timeout: Duration) -> Result<String> {
    debug!(program, ?args, "Running command");

    let mut command = Command::new(program);
    command
        .args(args)
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result
            .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", program, e)))?,
        Err(_) => {
            warn!(program, timeout_ms = timeout.as_millis() as u64, "Command timed out");
            return Err(Error::Timeout {
                command: program.to_string(),
                after: timeout,
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() && stdout.trim().is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            warn!(program, status = %output.status, stderr, "Command failed");
            return Err(Error::CommandFailed(format!(
                "{} exited with {}: {}",
                program, output.status, stderr
            )));
        }
    }

    Ok(stdout)
}
