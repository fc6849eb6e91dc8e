//! Configuration management for syncnorm.
//!
//! syncnorm reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SYNCNORM_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [normalizer]
//! rest_prefix = "/ws/rest/v1/"
//! disabled_rules = []
//!
//! [formats]
//! collapsible = ["org.openmrs.Program"]
//! non_collapsible = []
//!
//! [[attribute_types]]
//! uuid = "a0f5521c-dbbd-4c10-81b2-1b7ab18330df"
//! name = "Civil Status"
//! format = "org.openmrs.Concept"
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use syncnorm::config::load_config;
//! use syncnorm::core::normalize::Normalizer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("syncnorm.toml")?;
//! let normalizer = Normalizer::from_config(&config);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, load_config_str};
pub use schema::{ApplicationConfig, FormatsConfig, LoggingConfig, NormalizerConfig, SyncnormConfig};
