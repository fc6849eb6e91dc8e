//! Resource normalization
//!
//! Rewrites a fully expanded REST resource into the shape a peer server
//! accepts on submission. Each resource type has a [`ConversionRule`] in a
//! [`RuleRegistry`]; resource types without a rule pass through unchanged.
//!
//! # Example
//!
//! ```
//! use syncnorm::core::normalize::Normalizer;
//! use serde_json::json;
//!
//! # fn example() -> syncnorm::domain::Result<()> {
//! let normalizer = Normalizer::builder().build();
//!
//! let mut obs = json!({
//!     "uuid": "obs-1",
//!     "concept": {"uuid": "concept-1", "display": "WEIGHT (KG)"}
//! });
//! normalizer.convert_path("/ws/rest/v1/obs", &mut obs)?;
//! assert_eq!(obs["concept"], "concept-1");
//! # Ok(())
//! # }
//! ```

pub mod outcome;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod shape;

pub use outcome::{BatchFailure, BatchSummary, ConversionOutcome};
pub use registry::RuleRegistry;
pub use rule::{ConversionContext, ConversionRule, FnRule};

use crate::config::SyncnormConfig;
use crate::core::attribute::{
    AttributeTypeResolver, CachingResolver, FormatCapabilities, InMemoryResolver,
};
use crate::domain::{
    as_record_mut, NormalizerError, Record, ResourceTypeKey, Result, DEFAULT_REST_PREFIX,
};
use serde_json::Value;
use std::sync::Arc;

/// Resource normalizer
///
/// Holds no per-call state: one instance can be shared across threads and
/// every call touches only the record it is given.
pub struct Normalizer {
    registry: RuleRegistry,
    resolver: Arc<dyn AttributeTypeResolver>,
    formats: FormatCapabilities,
    rest_prefix: String,
}

impl Normalizer {
    /// Starts building a normalizer with the built-in rules, the default
    /// capability table and an empty resolver
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    /// Builds a normalizer from configuration
    ///
    /// Rules listed in `normalizer.disabled_rules` are dropped, configured
    /// attribute types back the resolver, and `[formats]` adjusts the
    /// capability table.
    pub fn from_config(config: &SyncnormConfig) -> Self {
        let mut registry = RuleRegistry::with_defaults();
        for resource_type in &config.normalizer.disabled_rules {
            if registry.unregister(resource_type).is_some() {
                tracing::info!(resource_type = %resource_type, "Conversion rule disabled");
            }
        }

        let resolver: InMemoryResolver = config.attribute_types.iter().cloned().collect();

        Self::builder()
            .registry(registry)
            .resolver(Arc::new(resolver))
            .formats(config.formats.to_capabilities())
            .rest_prefix(config.normalizer.rest_prefix.clone())
            .build()
    }

    /// The rule registry
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The collapsible-value capability table
    pub fn formats(&self) -> &FormatCapabilities {
        &self.formats
    }

    /// The REST prefix stripped by [`convert_path`](Self::convert_path)
    pub fn rest_prefix(&self) -> &str {
        &self.rest_prefix
    }

    /// Converts `record` in place according to the rule for `resource_type`
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::MalformedRecord`] if `record` is not a JSON
    /// object. Nothing else about the record's content is an error.
    pub fn convert(&self, resource_type: &str, record: &mut Value) -> Result<ConversionOutcome> {
        let record = as_record_mut(record)?;
        Ok(self.convert_record(resource_type, record))
    }

    /// Converts a record that is already known to be a mapping
    pub fn convert_record(&self, resource_type: &str, record: &mut Record) -> ConversionOutcome {
        self.convert_with(resource_type, record, self.resolver.as_ref())
    }

    /// Converts `record`, deriving the resource type from a REST request path
    ///
    /// # Errors
    ///
    /// Returns a validation error if no resource segment follows the
    /// configured prefix, or a malformed-record error as for
    /// [`convert`](Self::convert).
    pub fn convert_path(&self, path: &str, record: &mut Value) -> Result<ConversionOutcome> {
        let key = self.resource_type_for_path(path)?;
        self.convert(key.as_str(), record)
    }

    /// Derives the resource type key for a REST request path
    pub fn resource_type_for_path(&self, path: &str) -> Result<ResourceTypeKey> {
        ResourceTypeKey::from_rest_path(path, &self.rest_prefix).map_err(NormalizerError::Validation)
    }

    /// Converts a batch of records of the same resource type
    ///
    /// Attribute type lookups are cached for the duration of the batch. A
    /// record that is not a mapping is reported in the summary and the rest
    /// of the batch is still converted.
    pub fn convert_batch(&self, resource_type: &str, records: &mut [Value]) -> BatchSummary {
        let cache = CachingResolver::new(Arc::clone(&self.resolver));
        let mut summary = BatchSummary::new(resource_type.trim().to_lowercase(), records.len());

        for (index, value) in records.iter_mut().enumerate() {
            match as_record_mut(value) {
                Ok(record) => {
                    let outcome = self.convert_with(resource_type, record, &cache);
                    summary.add_outcome(&outcome);
                }
                Err(e) => {
                    tracing::warn!(
                        resource_type = %resource_type,
                        index,
                        error = %e,
                        "Skipping record in batch"
                    );
                    summary.add_failure(index, e.to_string());
                }
            }
        }

        tracing::debug!(
            resource_type = %resource_type,
            total = summary.total,
            converted = summary.converted,
            failed = summary.failures.len(),
            cached_lookups = cache.cached_entries(),
            "Batch conversion finished"
        );

        summary
    }

    fn convert_with(
        &self,
        resource_type: &str,
        record: &mut Record,
        resolver: &dyn AttributeTypeResolver,
    ) -> ConversionOutcome {
        let mut outcome = ConversionOutcome::new(resource_type.trim().to_lowercase());

        let Some(rule) = self.registry.get(resource_type) else {
            tracing::trace!(
                resource_type = %resource_type,
                "No conversion rule registered, passing record through"
            );
            return outcome;
        };

        let ctx = ConversionContext::new(resolver, &self.formats);
        rule.apply(record, &ctx, &mut outcome);
        outcome.rule_applied = true;

        crate::log_conversion!(&outcome);
        outcome
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("registry", &self.registry)
            .field("rest_prefix", &self.rest_prefix)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Normalizer`]
pub struct NormalizerBuilder {
    registry: RuleRegistry,
    resolver: Arc<dyn AttributeTypeResolver>,
    formats: FormatCapabilities,
    rest_prefix: String,
}

impl Default for NormalizerBuilder {
    fn default() -> Self {
        Self {
            registry: RuleRegistry::with_defaults(),
            resolver: Arc::new(InMemoryResolver::new()),
            formats: FormatCapabilities::default(),
            rest_prefix: DEFAULT_REST_PREFIX.to_string(),
        }
    }
}

impl NormalizerBuilder {
    /// Replaces the rule registry
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the attribute type resolver
    pub fn resolver(mut self, resolver: Arc<dyn AttributeTypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the capability table
    pub fn formats(mut self, formats: FormatCapabilities) -> Self {
        self.formats = formats;
        self
    }

    /// Sets the REST prefix used to derive resource types from paths
    pub fn rest_prefix(mut self, rest_prefix: impl Into<String>) -> Self {
        self.rest_prefix = rest_prefix.into();
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer {
            registry: self.registry,
            resolver: self.resolver,
            formats: self.formats,
            rest_prefix: self.rest_prefix,
        }
    }
}
