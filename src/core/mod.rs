//! Core business logic for syncnorm.
//!
//! # Modules
//!
//! - [`normalize`] - The resource normalizer, its rule registry and the built-in rules
//! - [`attribute`] - Person attribute type metadata and the collapsible-format table
//!
//! # Conversion Workflow
//!
//! 1. **Dispatch**: Look up the rule registered for the resource type key
//! 2. **Rewrite**: The rule collapses nested resources to uuids and strips
//!    fields the peer server rejects
//! 3. **Resolve** (person only): Attribute type formats are looked up through
//!    the resolver to decide whether a value may collapse
//! 4. **Report**: A [`normalize::ConversionOutcome`] records what changed
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use syncnorm::core::attribute::{AttributeTypeDescriptor, InMemoryResolver};
//! use syncnorm::core::normalize::Normalizer;
//! use syncnorm::domain::AttributeTypeUuid;
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = InMemoryResolver::new().with(AttributeTypeDescriptor::new(
//!     AttributeTypeUuid::new("civil-status")?,
//!     "org.openmrs.Concept",
//! ));
//! let normalizer = Normalizer::builder().resolver(Arc::new(resolver)).build();
//!
//! let mut person = json!({
//!     "attributes": [{"attributeType": "civil-status", "value": {"uuid": "married"}}]
//! });
//! normalizer.convert("person", &mut person)?;
//! assert_eq!(person["attributes"][0]["value"], "married");
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod normalize;
