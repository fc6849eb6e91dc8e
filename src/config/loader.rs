//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SyncnormConfig;
use crate::domain::errors::NormalizerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SYNCNORM_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SyncnormConfig
/// 4. Applies environment variable overrides (SYNCNORM_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use syncnorm::config::loader::load_config;
///
/// let config = load_config("syncnorm.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SyncnormConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NormalizerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NormalizerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file access.
pub fn load_config_str(contents: &str) -> Result<SyncnormConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SyncnormConfig = toml::from_str(&contents)
        .map_err(|e| NormalizerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        NormalizerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration from `path` if the file exists, defaults otherwise
///
/// Environment overrides apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<SyncnormConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = SyncnormConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        NormalizerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| NormalizerError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments are copied verbatim
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NormalizerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the SYNCNORM_* prefix
///
/// Environment variables follow the pattern: SYNCNORM_<SECTION>_<KEY>
/// For example: SYNCNORM_NORMALIZER_REST_PREFIX, SYNCNORM_LOGGING_LOCAL_PATH.
/// List values are comma separated.
fn apply_env_overrides(config: &mut SyncnormConfig) {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env_override("NORMALIZER_REST_PREFIX") {
        config.normalizer.rest_prefix = val;
    }
    if let Some(val) = env_override("NORMALIZER_DISABLED_RULES") {
        config.normalizer.disabled_rules = split_list(&val);
    }

    if let Some(val) = env_override("FORMATS_COLLAPSIBLE") {
        config.formats.collapsible = split_list(&val);
    }
    if let Some(val) = env_override("FORMATS_NON_COLLAPSIBLE") {
        config.formats.non_collapsible = split_list(&val);
    }

    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
