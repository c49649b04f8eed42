//! Container port enrichment from `docker ps`.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::domain::ContainerInfo;
use crate::ports::ContainerSource;

use super::command::run_command;

const PS_FORMAT: &str = "{{.Names}}\t{{.Image}}\t{{.Ports}}";

/// Reads published host ports from the docker CLI.
pub struct DockerCli {
    timeout: Duration,
}

impl DockerCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ContainerSource for DockerCli {
    async fn container_ports(&self) -> HashMap<u16, ContainerInfo> {
        match run_command("docker", &["ps", "--format", PS_FORMAT], self.timeout).await {
            Ok(output) => parse_docker_ps(&output),
            Err(e) => {
                debug!(error = %e, "Container runtime unavailable");
                HashMap::new()
            }
        }
    }
}

/// Parse tab-separated `name, image, ports` lines into a host-port map.
///
/// Only published mappings (`host:port->container/proto`) count. Port ranges
/// and unpublished container ports are skipped.
pub fn parse_docker_ps(output: &str) -> HashMap<u16, ContainerInfo> {
    let mut ports = HashMap::new();

    for line in output.lines() {
        let mut columns = line.splitn(3, '\t');
        let (Some(name), Some(image), Some(mappings)) =
            (columns.next(), columns.next(), columns.next())
        else {
            continue;
        };

        for mapping in mappings.split(',') {
            let Some(host_port) = parse_host_port(mapping) else {
                continue;
            };
            ports.entry(host_port).or_insert_with(|| ContainerInfo {
                name: name.trim().to_string(),
                image: image.trim().to_string(),
            });
        }
    }

    ports
}

/// Host port of one mapping such as `0.0.0.0:5432->5432/tcp` or `[::]:80->80/tcp`.
pub fn parse_host_port(mapping: &str) -> Option<u16> {
    let (host, _container) = mapping.trim().split_once("->")?;
    let port: u16 = host[host.rfind(':')? + 1..].parse().ok()?;
    (port != 0).then_some(port)
}
