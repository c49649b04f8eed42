//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod enrich;
mod inspector;
mod killer;
mod scanner;

pub use enrich::{ConnectionSource, ContainerSource};
pub use inspector::{ProcessDetails, ProcessInspector};
pub use killer::{KillOutcome, ProcessKillerPort};
pub use scanner::PortLister;
