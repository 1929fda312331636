//! Product records as loaded from the catalog feed.

use core::fmt;

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::ProductId;

/// A purchasable product.
///
/// Immutable once loaded; the catalog is fetched once and held for the
/// session. Unknown fields in the feed are ignored. Descriptive fields that
/// are missing or of the wrong type load as empty, so the product simply
/// fails to match filters on that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Gender category (e.g., "womens").
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Gender,
    /// Category (e.g., "Tops").
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    /// Available sizes.
    #[serde(default, deserialize_with = "lenient")]
    pub sizes: Vec<String>,
    /// Color variants. The feed calls this field `color`.
    #[serde(default, deserialize_with = "lenient")]
    pub color: Vec<ColorVariant>,
    /// Material description.
    #[serde(default, deserialize_with = "lenient")]
    pub material: String,
    /// Long-form description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
}

impl Product {
    /// Whether `size` is one of this product's sizes.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Look up a color variant by name.
    #[must_use]
    pub fn color_named(&self, name: &str) -> Option<&ColorVariant> {
        self.color.iter().find(|c| c.name == name)
    }

    /// The swatch used for cards and the product hero.
    #[must_use]
    pub fn primary_color(&self) -> Option<&ColorVariant> {
        self.color.first()
    }
}

/// A named color with its display value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Color name (e.g., "Navy").
    pub name: String,
    /// Display color value (e.g., "#1f2a44").
    pub hex: String,
}

/// Gender category of a product.
///
/// Unknown values from the feed are preserved in [`Gender::Other`] so that
/// filtering on them still works. A missing gender is `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Womens,
    Mens,
    Unisex,
    Other(String),
}

impl Gender {
    /// The feed value (e.g., "womens").
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Womens => "womens",
            Self::Mens => "mens",
            Self::Unisex => "unisex",
            Self::Other(value) => value,
        }
    }

    /// Human-readable label with the first letter capitalized ("Womens").
    #[must_use]
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "womens" => Self::Womens,
            "mens" => Self::Mens,
            "unisex" => Self::Unisex,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Deserialize a field, falling back to its default when the value has the
/// wrong shape (e.g., `null` or a number where a string is expected).
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field<V> {
        Valid(V),
        Invalid(IgnoredAny),
    }

    Ok(match Field::<T>::deserialize(deserializer)? {
        Field::Valid(value) => value,
        Field::Invalid(_) => T::default(),
    })
}

/// Uppercase the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
