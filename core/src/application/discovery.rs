//! Discovery pipeline: list, resolve, classify, enrich.

use std::collections::{BTreeSet, HashMap};
use std::io;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::adapters::{ConnectionScanner, DockerCli, PlatformInspector, PortScanner};
use crate::classify;
use crate::config::Config;
use crate::domain::{ContainerInfo, PortInfo};
use crate::error::Result;
use crate::ports::{ConnectionSource, ContainerSource, PortLister, ProcessDetails, ProcessInspector};

/// Process lookups in flight at once.
const MAX_CONCURRENT_LOOKUPS: usize = 16;

/// Produces one enriched snapshot of the listening ports per run.
///
/// The lister is the only step that can fail a run. Process details,
/// classifiers and both enrichment passes degrade to empty values.
pub struct Discovery<L, P, C, N> {
    lister: L,
    inspector: P,
    containers: Option<C>,
    connections: Option<N>,
}

/// Discovery wired to the adapters for the current platform.
pub type PlatformDiscovery = Discovery<PortScanner, PlatformInspector, DockerCli, ConnectionScanner>;

impl PlatformDiscovery {
    /// Build the platform pipeline, honouring the enrichment switches.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.command_timeout();
        Discovery::new(
            PortScanner::with_timeout(timeout),
            PlatformInspector::new(timeout),
            config.container_enrichment.then(|| DockerCli::new(timeout)),
            config.connection_counts.then(|| ConnectionScanner::new(timeout)),
        )
    }
}

impl<L, P, C, N> Discovery<L, P, C, N>
where
    L: PortLister,
    P: ProcessInspector,
    C: ContainerSource,
    N: ConnectionSource,
{
    pub fn new(lister: L, inspector: P, containers: Option<C>, connections: Option<N>) -> Self {
        Self {
            lister,
            inspector,
            containers,
            connections,
        }
    }

    /// Run the pipeline once.
    ///
    /// Records come back in the lister's order. Each distinct PID is
    /// resolved once, concurrently with both enrichment passes. Classifiers
    /// read manifests from arbitrary working directories, so they run on the
    /// blocking pool.
    pub async fn run(&self) -> Result<Vec<PortInfo>> {
        let mut ports = self.lister.list().await?;

        let pids: BTreeSet<i32> = ports.iter().map(|p| p.pid).filter(|pid| *pid > 0).collect();
        let (processes, containers, connections) = tokio::join!(
            self.resolve_processes(pids),
            self.container_ports(),
            self.connection_counts(),
        );

        for port in &mut ports {
            if let Some((details, in_container)) = processes.get(&port.pid) {
                apply_details(port, details);
                port.in_container = *in_container;
            }
        }

        let mut ports = tokio::task::spawn_blocking(move || {
            ports.iter_mut().for_each(classify_port);
            ports
        })
        .await
        .map_err(io::Error::from)?;

        for port in &mut ports {
            if let Some(container) = containers.get(&port.port) {
                port.container = Some(container.clone());
                port.in_container = true;
            }
            port.connection_count = connections.get(&port.port).copied().unwrap_or(0);
        }

        info!(
            count = ports.len(),
            containers = containers.len(),
            "Discovery finished"
        );
        Ok(ports)
    }

    async fn resolve_processes(&self, pids: BTreeSet<i32>) -> HashMap<i32, (ProcessDetails, bool)> {
        stream::iter(pids)
            .map(|pid| async move {
                let (details, in_container) =
                    tokio::join!(self.inspector.inspect(pid), classify::in_container(pid));
                debug!(pid, ?details, in_container, "Resolved process");
                (pid, (details, in_container))
            })
            .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await
    }

    async fn container_ports(&self) -> HashMap<u16, ContainerInfo> {
        match &self.containers {
            Some(source) => source.container_ports().await,
            None => HashMap::new(),
        }
    }

    async fn connection_counts(&self) -> HashMap<u16, u32> {
        match &self.connections {
            Some(source) => source.connection_counts().await,
            None => HashMap::new(),
        }
    }
}

fn apply_details(port: &mut PortInfo, details: &ProcessDetails) {
    port.start_time = details.start_time;
    port.working_dir = details.working_dir.clone();
    port.command = details.command.clone();
}

fn classify_port(port: &mut PortInfo) {
    port.framework = classify::detect_framework(&port.working_dir, &port.command, &port.process_name)
        .unwrap_or_default()
        .to_string();
    port.project_display_name = classify::project_display_name(&port.working_dir).unwrap_or_default();
    port.environment = classify::launch_environment(&port.command)
        .unwrap_or_default()
        .to_string();
}
