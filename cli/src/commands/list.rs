//! List command - show all listening ports.

use anyhow::Result;
use chrono::Utc;
use tapas_core::{sort_ports, PlatformDiscovery};

use super::Settings;
use crate::format::{address_label, app_badge, format_uptime, process_label, truncate, RowKind};

pub async fn run(
    settings: &Settings,
    port_filter: Option<u16>,
    name_filter: Option<String>,
    json: bool,
) -> Result<()> {
    let discovery = PlatformDiscovery::from_config(&settings.config);
    let mut ports = discovery.run().await?;

    // Apply filters
    if let Some(p) = port_filter {
        ports.retain(|port| port.port == p);
    }
    if let Some(ref name) = name_filter {
        let name_lower = name.to_lowercase();
        ports.retain(|port| port.process_name.to_lowercase().contains(&name_lower));
    }

    let now = Utc::now();
    sort_ports(&mut ports, settings.config.default_sort, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(());
    }

    if ports.is_empty() {
        println!("No listening ports found.");
        return Ok(());
    }

    // Table header
    println!(
        "  {:<6} {:<8} {:<28} {:<14} {:<18} {:<18} {:>7} {:>5}",
        "PORT", "PID", "PROCESS", "APP", "PROJECT", "ADDRESS", "UPTIME", "CONN"
    );
    println!("{}", "-".repeat(111));

    let ascii = settings.config.ascii_indicators;
    for port in &ports {
        let symbol = RowKind::of(port, now).symbol(ascii);
        println!(
            "{} {:<6} {:<8} {:<28} {:<14} {:<18} {:<18} {:>7} {:>5}",
            symbol,
            port.port,
            port.pid,
            truncate(&process_label(port), 28),
            truncate(&app_badge(port), 14),
            truncate(port.project_label(), 18),
            truncate(&address_label(port), 18),
            format_uptime(port.uptime(now)),
            port.connection_count
        );
    }

    println!("\nTotal: {} ports", ports.len());
    Ok(())
}
