// syncnorm - REST resource normalizer for server-to-server synchronization
// Copyright (c) 2025 Syncnorm Contributors
// Licensed under the MIT License

//! # syncnorm
//!
//! syncnorm prepares clinical records for server-to-server synchronization.
//! A resource fetched from one server with its nested sub-objects expanded
//! cannot be posted to a peer as is: the peer expects some of those
//! sub-objects as bare uuid references and rejects others outright.
//! syncnorm rewrites the record into the shape the peer accepts.
//!
//! ## Architecture
//!
//! - [`core`] - The normalizer, its rule registry and attribute type metadata
//! - [`domain`] - Record model, identifiers and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use syncnorm::core::normalize::Normalizer;
//! use serde_json::json;
//!
//! # fn example() -> syncnorm::domain::Result<()> {
//! let normalizer = Normalizer::builder().build();
//!
//! let mut visit = json!({"uuid": "visit-1", "encounters": [{"uuid": "enc-1"}]});
//! let outcome = normalizer.convert("visit", &mut visit)?;
//!
//! assert!(visit.get("encounters").is_none());
//! assert_eq!(outcome.fields_removed, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Conversion Rules
//!
//! | Resource    | Rewrite                                                      |
//! |-------------|--------------------------------------------------------------|
//! | `obs`       | `concept` and `encounter` collapse to their uuid             |
//! | `person`    | attribute values collapse when their type's format allows it |
//! | `visit`     | `encounters` is removed                                      |
//! | `encounter` | `location.tags` is removed                                   |
//!
//! Any other resource type passes through unchanged. New rules are added
//! through [`core::normalize::RuleRegistry`] without touching dispatch.
//!
//! ## Error Handling
//!
//! Conversion is best effort. Missing or oddly shaped fields are skipped,
//! and a person attribute whose type cannot be resolved is left as received.
//! The only hard error is a record that is not a JSON object
//! ([`domain::NormalizerError::MalformedRecord`]).

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
