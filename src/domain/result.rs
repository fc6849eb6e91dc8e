//! Result type alias for syncnorm

use super::errors::NormalizerError;

/// Result type alias for syncnorm operations
///
/// # Examples
///
/// ```
/// use syncnorm::domain::result::Result;
/// use syncnorm::domain::errors::NormalizerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NormalizerError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NormalizerError>;
