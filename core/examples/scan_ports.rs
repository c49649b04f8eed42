//! Example: Run discovery once and print the enriched snapshot.

use chrono::Utc;
use tapas_core::{sort_ports, Config, PlatformDiscovery, SortKey};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("Scanning ports...\n");

    let discovery = PlatformDiscovery::from_config(&Config::default());

    match discovery.run().await {
        Ok(mut ports) => {
            if ports.is_empty() {
                println!("No listening ports found.");
                return;
            }
            sort_ports(&mut ports, SortKey::Port, Utc::now());

            println!(
                "{:<6} {:<8} {:<20} {:<15} {:<12} {}",
                "PORT", "PID", "PROCESS", "ADDRESS", "FRAMEWORK", "PROJECT"
            );
            println!("{}", "-".repeat(90));

            for port in &ports {
                println!(
                    "{:<6} {:<8} {:<20} {:<15} {:<12} {}",
                    port.port,
                    port.pid,
                    port.process_name.chars().take(20).collect::<String>(),
                    port.bind_address.chars().take(15).collect::<String>(),
                    port.framework,
                    port.project_label(),
                );
            }

            println!("\nTotal: {} ports", ports.len());
        }
        Err(e) => {
            eprintln!("Error scanning ports: {}", e);
        }
    }
}
