//! Port lister port (interface).

use crate::domain::PortInfo;
use crate::error::Result;

/// Port for listing listening TCP sockets.
///
/// This trait defines the interface for the platform lister. Implementations
/// run one OS listing command and parse it (ss, lsof, ...).
pub trait PortLister: Send + Sync {
    /// List all listening TCP ports.
    ///
    /// Returns records carrying only the base fields (port, pid, process name,
    /// bind address), unique by `(pid, port)`. A failing listing command is
    /// returned as an error, never as a partial list.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<PortInfo>>> + Send;
}
