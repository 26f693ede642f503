//! CLI module for sender-rs
//!
//! - Argument parsing with clap
//! - Settings loading with CLI overrides
//! - Command handlers for email and sms

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel};

use crate::config::{ConfigLoader, Settings};

/// Load settings for a CLI run
///
/// `--config` selects single-file mode; otherwise the loader reads the
/// layered configuration directory. `--log-level` replaces the configured level.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };

    let mut settings = loader.load()?;
    if let Some(level) = cli.log_level {
        settings.logger.level = level.as_str().to_string();
    }

    Ok(settings)
}
