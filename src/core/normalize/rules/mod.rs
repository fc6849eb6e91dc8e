//! Built-in conversion rules
//!
//! - [`obs`] - Collapses an observation's concept and encounter
//! - [`person`] - Collapses person attribute values whose format allows it
//! - [`visit`] - Strips the nested encounter list from visits
//! - [`encounter`] - Strips location tags from an encounter's location

pub mod encounter;
pub mod obs;
pub mod person;
pub mod visit;

pub use encounter::EncounterRule;
pub use obs::ObsRule;
pub use person::PersonRule;
pub use visit::VisitRule;
