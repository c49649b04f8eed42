//! Configuration for tapas.
//!
//! Read from `~/.tapas/config.json`. Missing keys take their defaults and a
//! missing file means an all-default configuration. Nothing is ever written
//! back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::domain::SortKey;
use crate::error::{Error, Result};

/// Shortest watch-mode interval accepted, in seconds.
pub const MIN_WATCH_INTERVAL_SECS: u64 = 1;

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Watch-mode refresh interval in seconds.
    #[serde(default = "default_watch_interval")]
    pub watch_interval: u64,

    /// Timeout for each external command, in milliseconds.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Sort order the port table starts with.
    #[serde(default)]
    pub default_sort: SortKey,

    /// Restrict row indicators to ASCII.
    #[serde(default)]
    pub ascii_indicators: bool,

    /// Ask the container runtime which ports it publishes.
    #[serde(default = "default_true")]
    pub container_enrichment: bool,

    /// Count established connections per port.
    #[serde(default = "default_true")]
    pub connection_counts: bool,
}

fn default_watch_interval() -> u64 {
    5
}

fn default_command_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_interval: default_watch_interval(),
            command_timeout_ms: default_command_timeout_ms(),
            default_sort: SortKey::default(),
            ascii_indicators: false,
            container_enrichment: true,
            connection_counts: true,
        }
    }
}

impl Config {
    /// Watch interval, never shorter than [`MIN_WATCH_INTERVAL_SECS`].
    pub fn watch_period(&self) -> Duration {
        Duration::from_secs(self.watch_interval.max(MIN_WATCH_INTERVAL_SECS))
    }

    /// Per-command timeout.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms.max(1))
    }
}

/// Home of the config file and the log file: `~/.tapas`.
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".tapas"))
}

/// Read-only access to the configuration file.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a config store with the default path.
    ///
    /// Default path: `~/.tapas/config.json`
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: data_dir()?.join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    fn test_store(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::with_path(dir.path().join("config.json"))
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let dir = tempdir().unwrap();
        let config = assert_ok!(test_store(&dir).load().await);
        assert_eq!(config, Config::default());
        assert_eq!(config.watch_period(), Duration::from_secs(5));
        assert_eq!(config.command_timeout(), Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        std::fs::write(
            store.path(),
            r#"{"watchInterval": 2, "defaultSort": "uptime", "containerEnrichment": false}"#,
        )
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.watch_interval, 2);
        assert_eq!(config.default_sort, SortKey::Uptime);
        assert!(!config.container_enrichment);
        assert!(config.connection_counts);
        assert_eq!(config.command_timeout_ms, 5000);
    }

    #[tokio::test]
    async fn test_watch_interval_floor() {
        let config = Config {
            watch_interval: 0,
            ..Config::default()
        };
        assert_eq!(config.watch_period(), Duration::from_secs(MIN_WATCH_INTERVAL_SECS));
    }

    #[tokio::test]
    async fn test_invalid_file_is_json_error() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = assert_err!(store.load().await);
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory exists at the path but cannot be read as a file.
        let store = ConfigStore::with_path(dir.path().to_path_buf());

        let err = assert_err!(store.load().await);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["watchInterval"], 5);
        assert_eq!(json["defaultSort"], "port");
        assert_eq!(json["asciiIndicators"], false);
    }
}
