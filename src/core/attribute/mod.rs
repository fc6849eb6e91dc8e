//! Person attribute type metadata
//!
//! - [`descriptor`] - Attribute type descriptors and value formats
//! - [`resolver`] - The lookup seam and the in-memory and caching resolvers
//! - [`capability`] - Which value formats may collapse to a uuid reference

pub mod capability;
pub mod descriptor;
pub mod resolver;

pub use capability::{FormatCapabilities, DEFAULT_COLLAPSIBLE_FORMATS};
pub use descriptor::{AttributeTypeDescriptor, ValueFormat};
pub use resolver::{AttributeTypeResolver, CachingResolver, InMemoryResolver};
