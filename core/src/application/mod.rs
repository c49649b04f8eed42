//! Application layer - Use case services.
//!
//! Services orchestrate domain logic and adapter interactions:
//! - [`Discovery`] turns the platform lister, process inspector and
//!   enrichment sources into one snapshot of listening ports.
//! - [`Controller`] is the event-driven state machine behind the TUI. It
//!   performs no I/O itself and asks the runtime for work through [`Effect`]s.

mod controller;
mod discovery;

pub use controller::{
    Controller, ControllerSettings, ControllerState, Effect, Event, KillPrompt, Modal, Mode,
};
pub use discovery::{Discovery, PlatformDiscovery};
