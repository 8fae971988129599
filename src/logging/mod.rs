//! Application logging functionality
//!
//! Handles log file management. Terminal output comes from Bevy's log plugin;
//! `--log-to-file` adds a second, non-blocking layer that writes to
//! ~/.config/kerf/logs.

use crate::core::config_file::ConfigFile;
use bevy::log::BoxedLayer;
use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;

/// Keeps the background log writer alive for the lifetime of the app
#[derive(Resource)]
pub struct LogFileGuard(#[allow(dead_code)] WorkerGuard);

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// File name of today's log
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d");
    format!("kerf-{timestamp}.log")
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(current_log_file_name())
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// Log layer writing plain-text records to today's log file.
///
/// Plugged into `LogPlugin::custom_layer`. Runs before the global subscriber
/// exists, so failures go to stderr.
pub fn file_log_layer(app: &mut App) -> Option<BoxedLayer> {
    if let Err(e) = initialize_logs_directory() {
        eprintln!("Failed to create logs directory: {e}");
        return None;
    }

    let appender = tracing_appender::rolling::never(logs_dir(), current_log_file_name());
    let (writer, guard) = tracing_appender::non_blocking(appender);
    app.insert_resource(LogFileGuard(guard));

    Some(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .boxed(),
    )
}

/// Layer hook used when file logging is off
pub fn no_extra_layer(_app: &mut App) -> Option<BoxedLayer> {
    None
}
