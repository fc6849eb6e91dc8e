//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and optional
//! JSON log files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use syncnorm::logging::init_logging;
//! use syncnorm::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a record conversion
///
/// # Example
///
/// ```no_run
/// use syncnorm::log_conversion;
/// use syncnorm::core::normalize::ConversionOutcome;
///
/// let outcome = ConversionOutcome::new("obs");
/// log_conversion!(&outcome);
/// ```
#[macro_export]
macro_rules! log_conversion {
    ($outcome:expr) => {
        tracing::debug!(
            resource_type = %$outcome.resource_type,
            rule_applied = $outcome.rule_applied,
            fields_collapsed = $outcome.fields_collapsed,
            fields_removed = $outcome.fields_removed,
            unresolved_attributes = $outcome.unresolved_attributes,
            "Record converted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use syncnorm::log_error_with_context;
/// use syncnorm::domain::NormalizerError;
///
/// let error = NormalizerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
