//! Application runner logic
//!
//! Handles one-shot CLI flags before the workbench window opens

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use anyhow::{Context, Result};

/// Create and run the application with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory")?;
        return Ok(());
    }

    let mut app = crate::core::app::create_app(cli_args)?;
    app.run();
    Ok(())
}
