//! Tracing subscriber setup.
//!
//! The filter comes from `TAPAS_LOG` (default `warn`). The TUI owns the
//! terminal, so in interactive mode logs go to `~/.tapas/tapas.log` when
//! `TAPAS_LOG` is set and nowhere otherwise.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TAPAS_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

pub fn init(target: LogTarget) {
    let requested = std::env::var_os(LOG_ENV).is_some();
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        LogTarget::File if requested => match open_log_file() {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(_) => init_sink(filter),
        },
        LogTarget::File => init_sink(filter),
    }
}

fn init_sink(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::sink)
        .try_init();
}

fn open_log_file() -> anyhow::Result<fs::File> {
    let dir = tapas_core::config::data_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tapas.log"))?)
}
