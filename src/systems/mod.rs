//! Bevy Systems and Plugins
//!
//! This module contains Bevy-specific systems and plugin configurations:
//! - Plugin management and logging configuration
//! - The demo workbench and its edit log

pub mod plugins;
pub mod workbench;

// Re-export commonly used items
pub use plugins::{configure_default_plugins, configure_logging, KerfSystems};
pub use workbench::{exit_on_esc, log_committed_edits, populate_demo_scene, DemoScene};
