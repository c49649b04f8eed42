//! macOS port lister using lsof.

use std::time::Duration;

use tracing::debug;

use crate::adapters::command::run_command;
use crate::domain::PortInfo;
use crate::error::Result;

use super::lsof::parse_lsof_output;
use super::Scanner;

/// macOS-specific port lister.
pub struct DarwinScanner {
    timeout: Duration,
}

impl DarwinScanner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Scanner for DarwinScanner {
    async fn scan(&self) -> Result<Vec<PortInfo>> {
        let stdout = run_command(
            "lsof",
            &["-iTCP", "-sTCP:LISTEN", "-P", "-n", "+c", "0"],
            self.timeout,
        )
        .await?;
        let ports = parse_lsof_output(&stdout);
        debug!(count = ports.len(), "Parsed lsof output");
        Ok(ports)
    }
}
