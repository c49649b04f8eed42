//! Text helpers shared by the table printer and the TUI.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tapas_core::classify::{app_name, is_database_port, is_system_port, is_system_process};
use tapas_core::PortInfo;

const LONG_RUNNING: Duration = Duration::from_secs(24 * 3600);
const DEV_PORTS: std::ops::RangeInclusive<u16> = 3000..=3005;

/// Semantic category of a port row, shown as a one-character cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    System,
    Container,
    LongRunning,
    Dev,
    Database,
    Default,
}

impl RowKind {
    /// Classify a row. System status takes priority over container status.
    pub fn of(port: &PortInfo, now: DateTime<Utc>) -> Self {
        if is_system_port(port.port) || is_system_process(&port.process_name) {
            RowKind::System
        } else if port.container.is_some() || port.in_container {
            RowKind::Container
        } else if port.uptime(now) >= LONG_RUNNING {
            RowKind::LongRunning
        } else if DEV_PORTS.contains(&port.port) {
            RowKind::Dev
        } else if is_database_port(port.port) {
            RowKind::Database
        } else {
            RowKind::Default
        }
    }

    pub fn symbol(self, ascii: bool) -> &'static str {
        match self {
            RowKind::System if ascii => ".",
            RowKind::System => "·",
            RowKind::Container => "C",
            RowKind::LongRunning => "!",
            RowKind::Dev => "D",
            RowKind::Database => "B",
            RowKind::Default => "-",
        }
    }
}

/// Process column: container, framework with process, or the bare name.
pub fn process_label(port: &PortInfo) -> String {
    if let Some(container) = &port.container {
        return if container.image.is_empty() {
            format!("Docker: {}", container.name)
        } else {
            format!("Docker: {} ({})", container.name, container.image)
        };
    }
    match (port.framework.is_empty(), port.process_name.is_empty()) {
        (false, false) => format!("{} ({})", port.framework, port.process_name),
        (false, true) => port.framework.clone(),
        (true, false) => port.process_name.clone(),
        (true, true) => "—".to_string(),
    }
}

/// App column: container badge, framework, or a well-known app name.
pub fn app_badge(port: &PortInfo) -> String {
    let badge = if port.container.is_some() {
        "Docker"
    } else if !port.framework.is_empty() {
        port.framework.as_str()
    } else {
        app_name(port.port, &port.process_name).unwrap_or("—")
    };
    if port.container.is_none() && port.in_container {
        format!("{badge} C")
    } else {
        badge.to_string()
    }
}

/// Bind address, with ` *` appended when it listens on every interface.
pub fn address_label(port: &PortInfo) -> String {
    if port.is_public() {
        format!("{} *", port.bind_address)
    } else {
        port.bind_address.clone()
    }
}

/// Coarse uptime: `42s`, `5m`, `3h`, `2d`, or `—` when unknown.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    match secs {
        0 => "—".to_string(),
        1..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Truncate to `max` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = s.chars().take(max - 1).collect();
    cut.push('…');
    cut
}
