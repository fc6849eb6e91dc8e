//! Rule registry
//!
//! Maps resource type keys to conversion rules. Keys are matched after
//! trimming and lowercasing; a key with no rule maps to the identity
//! transformation.

use super::outcome::ConversionOutcome;
use super::rule::{ConversionContext, ConversionRule, FnRule};
use super::rules::{EncounterRule, ObsRule, PersonRule, VisitRule};
use crate::domain::{NormalizerError, Record, ResourceTypeKey, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of conversion rules keyed by resource type
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<ResourceTypeKey, Arc<dyn ConversionRule>>,
}

impl RuleRegistry {
    /// Creates an empty registry where every resource type passes through
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in rules
    /// (`obs`, `person`, `visit`, `encounter`)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(ObsRule));
        registry.insert(Arc::new(PersonRule));
        registry.insert(Arc::new(VisitRule));
        registry.insert(Arc::new(EncounterRule));
        registry
    }

    /// Registers a rule under its own resource type
    ///
    /// A rule already registered for the same key is replaced and returned.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the rule's resource type is not a
    /// usable key.
    pub fn register<R>(&mut self, rule: R) -> Result<Option<Arc<dyn ConversionRule>>>
    where
        R: ConversionRule + 'static,
    {
        let rule: Arc<dyn ConversionRule> = Arc::new(rule);
        ResourceTypeKey::new(rule.resource_type()).map_err(NormalizerError::Validation)?;
        Ok(self.insert(rule))
    }

    /// Registers a closure as the rule for `resource_type`
    pub fn register_fn<F>(
        &mut self,
        resource_type: impl AsRef<str>,
        f: F,
    ) -> Result<Option<Arc<dyn ConversionRule>>>
    where
        F: Fn(&mut Record, &ConversionContext<'_>, &mut ConversionOutcome) + Send + Sync + 'static,
    {
        let rule = FnRule::new(resource_type, f).map_err(NormalizerError::Validation)?;
        self.register(rule)
    }

    /// Removes the rule for `resource_type`, restoring pass-through
    pub fn unregister(&mut self, resource_type: &str) -> Option<Arc<dyn ConversionRule>> {
        let key = ResourceTypeKey::new(resource_type).ok()?;
        self.rules.remove(&key)
    }

    /// Looks up the rule for `resource_type`
    pub fn get(&self, resource_type: &str) -> Option<&Arc<dyn ConversionRule>> {
        let key = ResourceTypeKey::new(resource_type).ok()?;
        self.rules.get(&key)
    }

    /// Returns true if a rule is registered for `resource_type`
    pub fn contains(&self, resource_type: &str) -> bool {
        self.get(resource_type).is_some()
    }

    /// Registered resource type keys, sorted
    pub fn resource_types(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.rules.keys().map(ResourceTypeKey::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn insert(&mut self, rule: Arc<dyn ConversionRule>) -> Option<Arc<dyn ConversionRule>> {
        match ResourceTypeKey::new(rule.resource_type()) {
            Ok(key) => self.rules.insert(key, rule),
            Err(_) => None,
        }
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}
