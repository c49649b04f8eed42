//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod port;
mod view;

// Re-export all domain types
pub use port::{ContainerInfo, PortInfo, ALL_INTERFACES};
pub use view::{derive_view, filter_ports, sort_ports, SortKey};
