//! Domain models and types for syncnorm.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The record model** ([`Record`]): an ordered JSON object
//! - **Strongly-typed identifiers** ([`ResourceTypeKey`], [`AttributeTypeUuid`])
//! - **Error types** ([`NormalizerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! ```rust
//! use syncnorm::domain::{ResourceTypeKey, DEFAULT_REST_PREFIX};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let key = ResourceTypeKey::new("obs")?;
//! let same = ResourceTypeKey::from_rest_path("/ws/rest/v1/obs", DEFAULT_REST_PREFIX)?;
//! assert_eq!(key, same);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::NormalizerError;
pub use ids::{AttributeTypeUuid, ResourceTypeKey, DEFAULT_REST_PREFIX};
pub use record::{as_record_mut, value_kind, Record};
pub use result::Result;
