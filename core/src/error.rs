//! Error types for the tapas-core library.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for tapas operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port discovery and process management.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// A system command did not finish in time.
    #[error("Command `{command}` timed out after {}ms", .after.as_millis())]
    Timeout { command: String, after: Duration },

    /// Failed to parse command output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// Failed to signal a process.
    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: i32, reason: String },

    /// The PID can never name a killable process.
    #[error("Invalid PID {0}: refusing to send a signal")]
    InvalidPid(i32),

    /// Permission denied for an operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KillFailed {
            pid: 42,
            reason: "Invalid argument".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to kill process 42: Invalid argument");

        let err = Error::Timeout {
            command: "ss".to_string(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "Command `ss` timed out after 1500ms");

        let err = Error::InvalidPid(-1);
        assert!(err.to_string().contains("-1"));
    }
}
