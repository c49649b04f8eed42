//! Port and process domain models.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical "all interfaces" bind address.
pub const ALL_INTERFACES: &str = "0.0.0.0";

// ============================================================================
// ContainerInfo
// ============================================================================

/// Container publishing a host port, as reported by the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container name (e.g. "my-api").
    pub name: String,
    /// Image the container runs (e.g. "postgres:15").
    pub image: String,
}

// ============================================================================
// PortInfo
// ============================================================================

/// Information about a listening port and its owning process.
///
/// Built once per refresh by the discovery pipeline. The base fields come from
/// the platform lister; everything below `command` is best-effort enrichment
/// and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    /// The port number (e.g., 3000, 8080).
    pub port: u16,
    /// Process ID of the owning process, 0 when it could not be resolved.
    pub pid: i32,
    /// Short command name of the owning process.
    pub process_name: String,
    /// Transport protocol. Always "tcp".
    pub protocol: String,
    /// Network address the port is bound to.
    pub bind_address: String,
    /// When the owning process started.
    pub start_time: Option<DateTime<Utc>>,
    /// Working directory of the owning process.
    pub working_dir: String,
    /// Full command line that started the process.
    pub command: String,

    /// Framework label (e.g. "Next.js", "Rails").
    #[serde(default)]
    pub framework: String,
    /// Whether the process runs inside a container cgroup.
    #[serde(default)]
    pub in_container: bool,
    /// Container publishing this port on the host.
    #[serde(default)]
    pub container: Option<ContainerInfo>,
    /// Project name from manifests or the repository directory.
    #[serde(default)]
    pub project_display_name: String,
    /// Established connections to this port.
    #[serde(default)]
    pub connection_count: u32,
    /// How the process was launched (npm, cargo, python, ...).
    #[serde(default)]
    pub environment: String,
}

impl PortInfo {
    /// Create a freshly listed port with no enrichment.
    ///
    /// Wildcard bind addresses (`*` or empty) are normalized to `0.0.0.0`.
    pub fn listening(
        port: u16,
        pid: i32,
        process_name: impl Into<String>,
        bind_address: impl Into<String>,
    ) -> Self {
        Self {
            port,
            pid,
            process_name: process_name.into(),
            protocol: "tcp".to_string(),
            bind_address: normalize_bind_address(bind_address.into()),
            start_time: None,
            working_dir: String::new(),
            command: String::new(),
            framework: String::new(),
            in_container: false,
            container: None,
            project_display_name: String::new(),
            connection_count: 0,
            environment: String::new(),
        }
    }

    /// Time since the process started, zero when the start time is unknown.
    pub fn uptime(&self, now: DateTime<Utc>) -> Duration {
        self.start_time
            .and_then(|start| (now - start).to_std().ok())
            .unwrap_or_default()
    }

    /// Last segment of the working directory, or "—" when it is unknown.
    pub fn project(&self) -> &str {
        let dir = self.working_dir.as_str();
        if dir.is_empty() {
            return "—";
        }
        match dir.rfind('/') {
            Some(i) if i + 1 < dir.len() => &dir[i + 1..],
            _ => dir,
        }
    }

    /// Project display name when known, else the working-directory segment.
    pub fn project_label(&self) -> &str {
        if self.project_display_name.is_empty() {
            self.project()
        } else {
            &self.project_display_name
        }
    }

    /// Whether the socket accepts connections on every interface.
    pub fn is_public(&self) -> bool {
        matches!(
            self.bind_address.as_str(),
            ALL_INTERFACES | "[::]" | "::"
        )
    }

    /// Check if this port matches a search query.
    ///
    /// Case-insensitive substring match over the port number, process name,
    /// project label, working directory, framework and container metadata.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&query_lower);

        self.port.to_string().contains(&query_lower)
            || contains(&self.process_name)
            || contains(self.project_label())
            || contains(self.project())
            || contains(&self.working_dir)
            || contains(&self.framework)
            || self
                .container
                .as_ref()
                .is_some_and(|c| contains(&c.name) || contains(&c.image))
    }
}

impl std::fmt::Display for PortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} (PID: {}, Process: {})",
            self.bind_address, self.port, self.pid, self.process_name
        )
    }
}

fn normalize_bind_address(address: String) -> String {
    match address.trim() {
        "" | "*" => ALL_INTERFACES.to_string(),
        trimmed => trimmed.to_string(),
    }
}
