//! Validate config command implementation

use crate::config::load_config;
use crate::core::normalize::Normalizer;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let normalizer = Normalizer::from_config(&config);

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  REST Prefix: {}", normalizer.rest_prefix());
        println!(
            "  Active Rules: {}",
            normalizer.registry().resource_types().join(", ")
        );
        if !config.normalizer.disabled_rules.is_empty() {
            println!(
                "  Disabled Rules: {}",
                config.normalizer.disabled_rules.join(", ")
            );
        }

        let mut formats: Vec<&str> = normalizer
            .formats()
            .collapsible_formats()
            .map(|format| format.as_str())
            .collect();
        formats.sort_unstable();
        println!("  Collapsible Formats: {}", formats.join(", "));
        println!("  Attribute Types: {}", config.attribute_types.len());
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
