//! Enrichment source ports (interfaces).

use std::collections::HashMap;

use crate::domain::ContainerInfo;

/// Port for the container runtime's published-port table.
pub trait ContainerSource: Send + Sync {
    /// Map of host port to the container publishing it.
    ///
    /// Returns an empty map when the runtime is missing or not running.
    fn container_ports(
        &self,
    ) -> impl std::future::Future<Output = HashMap<u16, ContainerInfo>> + Send;
}

/// Port for established-connection statistics.
pub trait ConnectionSource: Send + Sync {
    /// Number of established connections per local port.
    ///
    /// Returns an empty map when the connection tool is unavailable.
    fn connection_counts(&self) -> impl std::future::Future<Output = HashMap<u16, u32>> + Send;
}
