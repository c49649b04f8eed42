//! Classifier suite - heuristic labels for port records.
//!
//! Every classifier is an ordered rule table where the first match wins.
//! File reads are limited to the working directory they are given.

mod app;
mod container;
mod database;
mod environment;
mod framework;
mod project;
mod system;

pub use app::app_name;
pub use container::{cgroup_indicates_container, in_container};
pub use database::{database_product, is_database_port};
pub use environment::launch_environment;
pub use framework::detect_framework;
pub use project::project_display_name;
pub use system::{is_system_port, is_system_process};
