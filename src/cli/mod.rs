//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for syncnorm using clap.

pub mod commands;

use crate::config::{load_config_or_default, LoggingConfig};
use clap::{Parser, Subcommand};

/// Console level used when the configuration cannot be loaded
const FALLBACK_LOG_LEVEL: &str = "warn";

/// syncnorm - normalize REST resources for submission to a peer server
#[derive(Parser, Debug)]
#[command(name = "syncnorm")]
#[command(version, about, long_about = None)]
#[command(author = "Syncnorm Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "syncnorm.toml", env = "SYNCNORM_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SYNCNORM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolves the log level and logging configuration for this invocation
    ///
    /// `--log-level` takes precedence over `[application] log_level`. File
    /// logging follows `[logging]`. If the configuration cannot be loaded,
    /// console-only logging is used and the command reports the error.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config_or_default(&self.config) {
            Ok(config) => {
                let level = self
                    .log_level
                    .clone()
                    .unwrap_or(config.application.log_level);
                (level, config.logging)
            }
            Err(_) => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| FALLBACK_LOG_LEVEL.to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a JSON record (or array of records) for submission
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
