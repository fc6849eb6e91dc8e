//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables take ENV_MUTEX so they do not
//! interfere with each other.

use serde_json::json;
use std::io::Write;
use std::sync::Mutex;
use syncnorm::config::load_config;
use syncnorm::core::normalize::Normalizer;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("SYNCNORM_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SYNCNORM_NORMALIZER_REST_PREFIX");
    std::env::remove_var("SYNCNORM_NORMALIZER_DISABLED_RULES");
    std::env::remove_var("SYNCNORM_FORMATS_COLLAPSIBLE");
    std::env::remove_var("TEST_SYNCNORM_PREFIX");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const COMPLETE_CONFIG: &str = r#"
[application]
log_level = "debug"

[normalizer]
rest_prefix = "/openmrs/ws/rest/v1/"
disabled_rules = ["encounter"]

[formats]
collapsible = ["org.openmrs.Program"]
non_collapsible = ["org.openmrs.User"]

[[attribute_types]]
uuid = "a0f5521c-dbbd-4c10-81b2-1b7ab18330df"
name = "Civil Status"
format = "org.openmrs.Concept"

[[attribute_types]]
uuid = "c2299800-cca9-11e0-9572-0800200c9a66"
name = "Personal Doctor"
format = "org.openmrs.Provider"

[logging]
local_enabled = false
local_path = "/tmp/syncnorm"
local_rotation = "hourly"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.normalizer.rest_prefix, "/openmrs/ws/rest/v1/");
    assert_eq!(config.normalizer.disabled_rules, vec!["encounter".to_string()]);
    assert_eq!(config.formats.collapsible, vec!["org.openmrs.Program".to_string()]);
    assert_eq!(config.attribute_types.len(), 2);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_normalizer_from_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(COMPLETE_CONFIG);
    let config = load_config(file.path()).unwrap();
    let normalizer = Normalizer::from_config(&config);

    assert_eq!(normalizer.registry().resource_types(), vec!["obs", "person", "visit"]);

    let mut person = json!({
        "attributes": [
            {"attributeType": "a0f5521c-dbbd-4c10-81b2-1b7ab18330df", "value": {"uuid": "married"}},
            {"attributeType": "c2299800-cca9-11e0-9572-0800200c9a66", "value": {"uuid": "dr-who"}}
        ]
    });
    normalizer
        .convert_path("/openmrs/ws/rest/v1/person/abc", &mut person)
        .unwrap();
    assert_eq!(person["attributes"][0]["value"], "married");
    assert_eq!(person["attributes"][1]["value"], json!({"uuid": "dr-who"}));

    // Disabled rule passes through
    let mut encounter = json!({"location": {"uuid": "l-1", "tags": []}});
    normalizer.convert("encounter", &mut encounter).unwrap();
    assert!(encounter["location"].get("tags").is_some());
}

#[test]
fn test_empty_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.normalizer.rest_prefix, "/ws/rest/v1/");
    assert!(config.normalizer.disabled_rules.is_empty());
    assert!(config.attribute_types.is_empty());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_SYNCNORM_PREFIX", "/api/ws/rest/v1/");

    let file = write_config("[normalizer]\nrest_prefix = \"${TEST_SYNCNORM_PREFIX}\"\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.normalizer.rest_prefix, "/api/ws/rest/v1/");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[normalizer]\nrest_prefix = \"${TEST_SYNCNORM_PREFIX}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SYNCNORM_PREFIX"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SYNCNORM_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("SYNCNORM_NORMALIZER_DISABLED_RULES", "visit, obs");
    std::env::set_var("SYNCNORM_FORMATS_COLLAPSIBLE", "org.openmrs.Program");

    let file = write_config(COMPLETE_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(
        config.normalizer.disabled_rules,
        vec!["visit".to_string(), "obs".to_string()]
    );
    assert_eq!(config.formats.collapsible, vec!["org.openmrs.Program".to_string()]);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SYNCNORM_NORMALIZER_REST_PREFIX", "no-leading-slash");

    let file = write_config("");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("rest_prefix"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_values() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[formats]\ncollapsible = [\"x\"]\nnon_collapsible = [\"x\"]\n",
        "[[attribute_types]]\nuuid = \"a\"\nformat = \"org.openmrs.Concept\"\n[[attribute_types]]\nuuid = \"a\"\nformat = \"org.openmrs.Provider\"\n",
        "[[attribute_types]]\nuuid = \"a\"\n",
    ] {
        let file = write_config(content);
        assert!(load_config(file.path()).is_err(), "accepted: {content}");
    }
}
