//! TAPAS Core Library
//!
//! Inventory of local TCP listening ports. Provides functionality to:
//! - List listening TCP ports and the processes that own them
//! - Enrich them with framework, project, container and connection metadata
//! - Terminate an owning process (SIGTERM or SIGKILL)
//! - Drive an interactive port browser through a pure state machine
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models, filtering and sorting
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `classify`: Heuristic labels (framework, app, project, ...)
//! - `application`: Discovery pipeline and interactive controller
//!
//! # Platform Support
//! - Linux: `ss` and procfs
//! - macOS: `lsof` and `ps`
//! - Anything else: listing fails with [`Error::UnsupportedPlatform`]

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod classify;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{derive_view, filter_ports, sort_ports, ContainerInfo, PortInfo, SortKey};

// Re-export other commonly used types
pub use adapters::{PortScanner, ProcessKiller};
pub use application::{
    Controller, ControllerSettings, ControllerState, Discovery, Effect, Event, KillPrompt, Modal,
    Mode, PlatformDiscovery,
};
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use ports::{KillOutcome, ProcessKillerPort};
