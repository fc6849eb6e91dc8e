//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the normalizer works with. Each type
//! keeps resource type keys and attribute type uuids from being mixed up with
//! arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default versioned REST prefix stripped from request paths
pub const DEFAULT_REST_PREFIX: &str = "/ws/rest/v1/";

/// Resource type key newtype wrapper
///
/// Selects which conversion rule applies to a record (e.g. `obs`, `person`).
/// Keys are stored trimmed and lowercased.
///
/// # Examples
///
/// ```
/// use syncnorm::domain::ids::ResourceTypeKey;
/// use std::str::FromStr;
///
/// let key = ResourceTypeKey::from_str("Obs").unwrap();
/// assert_eq!(key.as_str(), "obs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceTypeKey(String);

impl ResourceTypeKey {
    /// Creates a new ResourceTypeKey from a string
    ///
    /// # Arguments
    ///
    /// * `key` - The resource type name
    ///
    /// # Returns
    ///
    /// Returns `Ok(ResourceTypeKey)` if the key is non-empty, `Err` otherwise
    pub fn new(key: impl AsRef<str>) -> Result<Self, String> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err("Resource type key cannot be empty".to_string());
        }
        if key.contains('/') {
            return Err(format!(
                "Resource type key cannot contain '/': {key}. Use from_rest_path for request paths"
            ));
        }
        Ok(Self(key.to_lowercase()))
    }

    /// Derives the resource type key from a REST request path
    ///
    /// Everything up to and including `prefix` is dropped, along with any
    /// query string or fragment. The first remaining path segment is the key.
    /// The prefix only matches whole path segments, so `/ws/rest/v10/obs`
    /// does not match `/ws/rest/v1/`. A relative path without the prefix is
    /// taken as starting at the resource segment; an absolute one is an error.
    ///
    /// ```
    /// use syncnorm::domain::ids::{ResourceTypeKey, DEFAULT_REST_PREFIX};
    ///
    /// let key = ResourceTypeKey::from_rest_path(
    ///     "/openmrs/ws/rest/v1/person/abc-123?v=full",
    ///     DEFAULT_REST_PREFIX,
    /// ).unwrap();
    /// assert_eq!(key.as_str(), "person");
    /// ```
    pub fn from_rest_path(path: &str, prefix: &str) -> Result<Self, String> {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        let prefix = prefix.trim_end_matches('/');
        let remainder = match strip_rest_prefix(path, prefix) {
            Some(rest) => rest,
            None if !path.starts_with('/') => path,
            None => return Err(format!("REST path {path} does not contain the prefix {prefix}/")),
        };

        let segment = remainder
            .split('/')
            .find(|segment| !segment.is_empty())
            .ok_or_else(|| format!("No resource segment in REST path: {path}"))?;

        Self::new(segment)
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Returns what follows the first occurrence of `prefix` that sits on path
/// segment boundaries
fn strip_rest_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }

    path.match_indices(prefix).find_map(|(idx, _)| {
        let starts_segment = idx == 0 || prefix.starts_with('/') || path[..idx].ends_with('/');
        let rest = &path[idx + prefix.len()..];
        let ends_segment = rest.is_empty() || rest.starts_with('/');
        (starts_segment && ends_segment).then_some(rest)
    })
}

impl fmt::Display for ResourceTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceTypeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ResourceTypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Attribute type uuid newtype wrapper
///
/// Identifies a person attribute type on the originating server. The value
/// is opaque: servers are not required to use RFC 4122 uuids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeTypeUuid(String);

impl AttributeTypeUuid {
    /// Creates a new AttributeTypeUuid from a string
    pub fn new(uuid: impl Into<String>) -> Result<Self, String> {
        let uuid = uuid.into();
        if uuid.trim().is_empty() {
            return Err("Attribute type uuid cannot be empty".to_string());
        }
        Ok(Self(uuid))
    }

    /// Returns the uuid as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeTypeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttributeTypeUuid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AttributeTypeUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
