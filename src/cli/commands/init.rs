//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "syncnorm.toml")]
    pub output: String,

    /// Include example attribute types and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Register the attribute types of your source server");
                println!("  2. Validate configuration: syncnorm validate-config");
                println!("  3. Convert a payload: syncnorm convert --path /ws/rest/v1/obs -i obs.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# syncnorm configuration

[application]
log_level = "info"

[normalizer]
rest_prefix = "/ws/rest/v1/"

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples
    fn generate_config_with_examples() -> String {
        r#"# syncnorm configuration
# Normalizes expanded REST resources before they are pushed to a peer server

[application]
# trace | debug | info | warn | error
log_level = "info"

[normalizer]
# Versioned REST prefix stripped from request paths to find the resource type
rest_prefix = "/ws/rest/v1/"

# Built-in rules to turn off: obs | person | visit | encounter
disabled_rules = []

[formats]
# Value formats whose nested values may be sent as a bare uuid, on top of
# org.openmrs.Concept, org.openmrs.Drug, org.openmrs.Location, org.openmrs.User
collapsible = []

# Formats that must always be sent as full nested objects
non_collapsible = []

# Person attribute types known on the source server.
# Values of attributes whose type is not listed here are never collapsed.
[[attribute_types]]
uuid = "8d871f2a-c2cc-11de-8d13-0010c6dffd0f"
name = "Civil Status"
format = "org.openmrs.Concept"

[[attribute_types]]
uuid = "8d87236c-c2cc-11de-8d13-0010c6dffd0f"
name = "Health Center"
format = "org.openmrs.Location"

[[attribute_types]]
uuid = "c2299800-cca9-11e0-9572-0800200c9a66"
name = "Personal Doctor"
format = "org.openmrs.Provider"

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
