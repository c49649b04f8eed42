//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter talks to one OS tool or kernel interface.

pub mod command;
pub mod connections;
pub mod docker;
pub mod inspector;
pub mod killer;
pub mod scanner;

// Re-export main types for convenience
pub use command::{run_command, DEFAULT_COMMAND_TIMEOUT};
pub use connections::ConnectionScanner;
pub use docker::DockerCli;
pub use inspector::{PlatformInspector, PsInspector};
pub use killer::ProcessKiller;
pub use scanner::PortScanner;

#[cfg(target_os = "linux")]
pub use inspector::ProcfsInspector;
