//! Port lister adapters.
//!
//! `ss` on Linux, `lsof` on macOS. Both parsers are compiled everywhere so
//! they can be tested on any host.

#[cfg(target_os = "macos")]
mod darwin;

#[cfg(target_os = "linux")]
mod linux;

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub mod lsof;
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub mod ss;

mod utils;

use std::time::Duration;

use crate::domain::PortInfo;
use crate::error::Result;
use crate::ports::PortLister;

pub(crate) use utils::Utils;

use super::command::DEFAULT_COMMAND_TIMEOUT;

/// The port lister for the current platform.
pub struct PortScanner {
    #[cfg(target_os = "macos")]
    inner: darwin::DarwinScanner,

    #[cfg(target_os = "linux")]
    inner: linux::LinuxScanner,

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    inner: UnsupportedScanner,
}

impl PortScanner {
    /// Create a lister with the default command timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    /// Create a lister whose subprocess is killed after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            #[cfg(target_os = "macos")]
            inner: darwin::DarwinScanner::new(timeout),

            #[cfg(target_os = "linux")]
            inner: linux::LinuxScanner::new(timeout),

            #[cfg(not(any(target_os = "macos", target_os = "linux")))]
            inner: UnsupportedScanner { _timeout: timeout },
        }
    }

    /// List all listening TCP ports.
    pub async fn scan(&self) -> Result<Vec<PortInfo>> {
        self.inner.scan().await
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PortLister for PortScanner {
    async fn list(&self) -> Result<Vec<PortInfo>> {
        self.inner.scan().await
    }
}

/// Internal trait for platform-specific implementations.
trait Scanner: Send + Sync {
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<PortInfo>>> + Send;
}

/// Fails every scan without spawning anything.
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
struct UnsupportedScanner {
    _timeout: Duration,
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
impl Scanner for UnsupportedScanner {
    async fn scan(&self) -> Result<Vec<PortInfo>> {
        Err(crate::error::Error::UnsupportedPlatform(
            "TAPAS supports macOS and Linux only".to_string(),
        ))
    }
}
