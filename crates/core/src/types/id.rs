//! Product identifiers.
//!
//! The remote catalog is untyped JSON: some feeds emit numeric ids, others
//! strings. [`ProductId`] accepts both and stores the canonical string form,
//! so ids from a freshly fetched catalog compare equal to ids restored from
//! a persisted cart.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A type-safe product identifier.
///
/// Serializes as a JSON string. Deserializes from either a string or an
/// integer.
///
/// # Example
///
/// ```rust
/// # use wardrobe_core::ProductId;
/// let from_text: ProductId = serde_json::from_str("\"42\"").unwrap();
/// let from_number: ProductId = serde_json::from_str("42").unwrap();
/// assert_eq!(from_text, from_number);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}
