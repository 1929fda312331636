//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A cart quantity, always at least one.
///
/// Invalid input is never rejected: zero, negative and unparsable values
/// coerce to one.
///
/// ```rust
/// # use wardrobe_core::Quantity;
/// assert_eq!(Quantity::coerce(0).get(), 1);
/// assert_eq!(Quantity::parse_lenient("3 shirts").get(), 3);
/// assert_eq!(Quantity::parse_lenient("abc").get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(1);

    /// Clamp any integer into a valid quantity.
    #[must_use]
    pub fn coerce(value: i64) -> Self {
        u32::try_from(value).map_or_else(
            |_| if value > 0 { Self(u32::MAX) } else { Self::ONE },
            |n| Self(n.max(1)),
        )
    }

    /// Parse form input, reading the leading integer and ignoring anything
    /// after it. Empty or non-numeric input yields one.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
            Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
            _ => (false, trimmed),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let Some(leading) = digits.get(..end).filter(|d| !d.is_empty()) else {
            return Self::ONE;
        };
        if negative {
            return Self::ONE;
        }
        leading
            .parse::<u32>()
            .map_or(Self(u32::MAX), |n| Self(n.max(1)))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value.max(1))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::coerce)
    }
}
