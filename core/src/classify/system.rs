//! System ports and OS daemons.

/// OS daemons that own listening sockets on a stock desktop.
const SYSTEM_PROCESSES: &[&str] = &[
    "sharingd",
    "rapportd",
    "identitys",
    "identityservicesd",
    "controlcenter",
    "controlce",
    "remotepairingd",
    "remotepai",
    "replicat",
];

/// Privileged port range.
pub fn is_system_port(port: u16) -> bool {
    (1..1024).contains(&port)
}

/// Whether a process name belongs to a known OS daemon.
pub fn is_system_process(process: &str) -> bool {
    let process = process.trim().to_lowercase();
    !process.is_empty() && SYSTEM_PROCESSES.iter().any(|d| process.contains(d))
}
