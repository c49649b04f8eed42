//! Kill command - terminate the processes listening on a port.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use tapas_core::{KillOutcome, PortScanner, ProcessKiller, ProcessKillerPort};

use super::Settings;

pub async fn run(settings: &Settings, port: u16, force: bool) -> Result<()> {
    let scanner = PortScanner::with_timeout(settings.config.command_timeout());
    let ports: Vec<_> = scanner
        .scan()
        .await?
        .into_iter()
        .filter(|p| p.port == port)
        .collect();

    if ports.is_empty() {
        bail!("No process is listening on port {}", port);
    }

    let killer = ProcessKiller::new();
    let signal = if force { "SIGKILL" } else { "SIGTERM" };
    let pids: BTreeSet<i32> = ports.iter().map(|p| p.pid).collect();
    let mut failures = 0;

    for pid in pids {
        let name = ports
            .iter()
            .find(|p| p.pid == pid)
            .map(|p| p.process_name.as_str())
            .unwrap_or_default();

        if pid <= 0 {
            eprintln!("✗ Owner of port {} is hidden; re-run with sudo to see it", port);
            failures += 1;
            continue;
        }

        let result = if force {
            killer.force_terminate(pid)
        } else {
            killer.terminate(pid)
        };

        match result {
            Ok(KillOutcome::Signalled) => {
                println!("✓ Sent {} to {} (PID {}) on port {}", signal, name, pid, port);
            }
            Ok(KillOutcome::AlreadyExited) => {
                println!("✓ {} (PID {}) had already exited", name, pid);
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("Failed to kill {} process(es) on port {}", failures, port);
    }
    Ok(())
}
