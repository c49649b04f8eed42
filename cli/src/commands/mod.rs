//! Non-interactive subcommands and the settings they share with the TUI.

pub mod config;
pub mod kill;
pub mod list;

use std::path::PathBuf;

use anyhow::Result;
use tapas_core::{Config, ConfigStore};

/// Configuration file contents with command-line overrides applied.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub config_path: PathBuf,
    /// Start the TUI with watch mode on.
    pub watch: bool,
}

impl Settings {
    /// Load the configuration file, or defaults when it does not exist.
    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let store = match path {
            Some(path) => ConfigStore::with_path(path),
            None => ConfigStore::new()?,
        };
        let config = store.load().await?;
        Ok(Self {
            config,
            config_path: store.path().to_path_buf(),
            watch: false,
        })
    }

    pub fn with_overrides(mut self, ascii: bool, watch: bool, interval: Option<u64>) -> Self {
        if ascii {
            self.config.ascii_indicators = true;
        }
        if let Some(secs) = interval {
            self.config.watch_interval = secs;
        }
        self.watch = watch;
        self
    }
}
