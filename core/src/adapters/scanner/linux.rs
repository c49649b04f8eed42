//! Linux port lister using ss.

use std::time::Duration;

use tracing::debug;

use crate::adapters::command::run_command;
use crate::domain::PortInfo;
use crate::error::Result;

use super::ss::parse_ss_output;
use super::Scanner;

/// Linux-specific port lister.
pub struct LinuxScanner {
    timeout: Duration,
}

impl LinuxScanner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Scanner for LinuxScanner {
    async fn scan(&self) -> Result<Vec<PortInfo>> {
        let stdout = run_command("ss", &["-Htlnp"], self.timeout).await?;
        let ports = parse_ss_output(&stdout);
        debug!(count = ports.len(), "Parsed ss output");
        Ok(ports)
    }
}
