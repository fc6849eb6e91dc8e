//! Attribute type resolution
//!
//! The person rule needs the registered value format of each attribute's
//! type. That metadata lives outside the normalizer and is reached through
//! the [`AttributeTypeResolver`] trait, so tests can stub it and hosts can
//! back it with a database, a REST client or a cache.

use super::descriptor::AttributeTypeDescriptor;
use crate::domain::ids::AttributeTypeUuid;
use crate::domain::Result;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Trait for attribute type lookup implementations
///
/// Lookups must be safe for concurrent reads. `Ok(None)` means the uuid is
/// unknown; `Err` means the lookup could not be performed. The person rule
/// treats both the same way and leaves the attribute unconverted.
pub trait AttributeTypeResolver: Send + Sync {
    /// Resolve an attribute type by uuid
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>>;
}

impl<T: AttributeTypeResolver + ?Sized> AttributeTypeResolver for Arc<T> {
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
        (**self).resolve(uuid)
    }
}

impl<T: AttributeTypeResolver + ?Sized> AttributeTypeResolver for &T {
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
        (**self).resolve(uuid)
    }
}

/// Resolver backed by an in-memory table of descriptors
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    descriptors: HashMap<AttributeTypeUuid, AttributeTypeDescriptor>,
}

impl InMemoryResolver {
    /// Creates an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor, replacing any previous one with the same uuid
    pub fn insert(&mut self, descriptor: AttributeTypeDescriptor) {
        self.descriptors.insert(descriptor.uuid.clone(), descriptor);
    }

    /// Adds a descriptor (builder form)
    pub fn with(mut self, descriptor: AttributeTypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Number of known attribute types
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no attribute types are known
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<AttributeTypeDescriptor> for InMemoryResolver {
    fn from_iter<I: IntoIterator<Item = AttributeTypeDescriptor>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl AttributeTypeResolver for InMemoryResolver {
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
        let Ok(key) = AttributeTypeUuid::new(uuid) else {
            return Ok(None);
        };
        Ok(self.descriptors.get(&key).cloned())
    }
}

/// Resolver that memoizes another resolver's answers
///
/// Both hits and misses are cached. Failed lookups are not, so a transient
/// outage does not poison the cache for the rest of the batch.
pub struct CachingResolver<R> {
    inner: R,
    cache: RwLock<HashMap<String, Option<AttributeTypeDescriptor>>>,
}

impl<R: AttributeTypeResolver> CachingResolver<R> {
    /// Wraps `inner` with an empty cache
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached answers
    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Consumes the cache and returns the wrapped resolver
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: AttributeTypeResolver> AttributeTypeResolver for CachingResolver<R> {
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uuid)
        {
            return Ok(cached.clone());
        }

        let resolved = self.inner.resolve(uuid)?;
        tracing::trace!(
            attribute_type = %uuid,
            found = resolved.is_some(),
            "Caching attribute type lookup"
        );
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uuid.to_string(), resolved.clone());
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizerError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        inner: InMemoryResolver,
        calls: AtomicUsize,
    }

    impl AttributeTypeResolver for CountingResolver {
        fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(uuid)
        }
    }

    struct FailingResolver;

    impl AttributeTypeResolver for FailingResolver {
        fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
            Err(NormalizerError::attribute_type(uuid, "connection refused"))
        }
    }

    fn concept_type() -> AttributeTypeDescriptor {
        AttributeTypeDescriptor::new(
            AttributeTypeUuid::new("a0f5521c").unwrap(),
            "org.openmrs.Concept",
        )
    }

    #[test]
    fn test_in_memory_resolver_hit_and_miss() {
        let resolver = InMemoryResolver::new().with(concept_type());

        let found = resolver.resolve("a0f5521c").unwrap().unwrap();
        assert_eq!(found.format.as_str(), "org.openmrs.Concept");
        assert!(resolver.resolve("unknown").unwrap().is_none());
        assert!(resolver.resolve("").unwrap().is_none());
    }

    #[test]
    fn test_in_memory_resolver_from_iter() {
        let resolver: InMemoryResolver = vec![concept_type()].into_iter().collect();
        assert_eq!(resolver.len(), 1);
        assert!(!resolver.is_empty());
    }

    #[test]
    fn test_caching_resolver_memoizes_hits_and_misses() {
        let counting = CountingResolver {
            inner: InMemoryResolver::new().with(concept_type()),
            calls: AtomicUsize::new(0),
        };
        let cache = CachingResolver::new(counting);

        for _ in 0..3 {
            assert!(cache.resolve("a0f5521c").unwrap().is_some());
            assert!(cache.resolve("missing").unwrap().is_none());
        }

        assert_eq!(cache.cached_entries(), 2);
        assert_eq!(cache.into_inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_caching_resolver_does_not_cache_failures() {
        let cache = CachingResolver::new(FailingResolver);
        assert!(cache.resolve("a0f5521c").is_err());
        assert_eq!(cache.cached_entries(), 0);
    }

    #[test]
    fn test_arc_resolver_delegates() {
        let shared: Arc<dyn AttributeTypeResolver> =
            Arc::new(InMemoryResolver::new().with(concept_type()));
        assert!(shared.resolve("a0f5521c").unwrap().is_some());
    }
}
