//! Process inspector adapters.

#[cfg(target_os = "linux")]
mod procfs;
#[cfg_attr(target_os = "linux", allow(dead_code))]
mod ps;

use std::time::Duration;

use crate::ports::{ProcessDetails, ProcessInspector};

#[cfg(target_os = "linux")]
pub use procfs::ProcfsInspector;
pub use ps::PsInspector;

/// The process inspector for the current platform.
pub struct PlatformInspector {
    #[cfg(target_os = "linux")]
    inner: ProcfsInspector,

    #[cfg(not(target_os = "linux"))]
    inner: PsInspector,
}

impl PlatformInspector {
    pub fn new(timeout: Duration) -> Self {
        #[cfg(target_os = "linux")]
        let inner = {
            let _ = timeout;
            ProcfsInspector::new()
        };
        #[cfg(not(target_os = "linux"))]
        let inner = PsInspector::new(timeout);

        Self { inner }
    }
}

impl ProcessInspector for PlatformInspector {
    async fn inspect(&self, pid: i32) -> ProcessDetails {
        self.inner.inspect(pid).await
    }
}
