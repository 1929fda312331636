//! The cart ledger.
//!
//! Lines are keyed by `(product id, size, color)`. Adding a matching item
//! increases the existing line instead of appending a duplicate. Each line
//! snapshots the product name, price and swatch at add time; later catalog
//! price changes are not re-synced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::types::{Product, ProductId, Quantity};

/// Errors returned by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested size is not offered for the product.
    #[error("size {size} is not available for product {product_id}")]
    UnknownSize {
        product_id: ProductId,
        size: String,
    },
    /// The requested color is not offered for the product.
    #[error("color {color} is not available for product {product_id}")]
    UnknownColor {
        product_id: ProductId,
        color: String,
    },
    /// The product has no size or no color to default to.
    #[error("product {0} has no default size and color")]
    NoDefaultVariant(ProductId),
    /// No line matches the given key.
    #[error("no cart line for {0}")]
    LineNotFound(LineKey),
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.product_id, self.size, self.color)
    }
}

/// One product/size/color combination in the cart.
///
/// The persisted field names (`id`, `colorHex`) match the stored ledger
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product the line refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Chosen size.
    pub size: String,
    /// Chosen color name.
    pub color: String,
    /// Swatch of the chosen color at add time.
    #[serde(default)]
    pub color_hex: String,
    /// Number of units.
    pub quantity: Quantity,
}

impl CartLine {
    /// The key identifying this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.size.clone(), self.color.clone())
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.get())
    }
}

/// The shopping cart.
///
/// Serializes as a JSON array of lines. Restoring trusts the stored lines
/// as-is; use [`Cart::stale_lines`] to find lines whose product is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Add `quantity` units of a product variant.
    ///
    /// Merges into an existing line with the same key, otherwise appends a
    /// new line snapshotting name, price and swatch.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownSize`] or [`CartError::UnknownColor`] if
    /// the variant is not offered by `product`.
    #[allow(clippy::indexing_slicing)] // index comes from position() or the push
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: Quantity,
    ) -> Result<&CartLine, CartError> {
        if !product.has_size(size) {
            return Err(CartError::UnknownSize {
                product_id: product.id.clone(),
                size: size.to_string(),
            });
        }
        let variant = product
            .color_named(color)
            .ok_or_else(|| CartError::UnknownColor {
                product_id: product.id.clone(),
                color: color.to_string(),
            })?;

        let key = LineKey::new(product.id.clone(), size, color);
        let index = if let Some(index) = self.lines.iter().position(|l| l.matches(&key)) {
            let line = &mut self.lines[index];
            line.quantity = line.quantity.saturating_add(quantity);
            index
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                size: size.to_string(),
                color: variant.name.clone(),
                color_hex: variant.hex.clone(),
                quantity,
            });
            self.lines.len() - 1
        };

        Ok(&self.lines[index])
    }

    /// Add one unit of the product's first size and first color.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoDefaultVariant`] if the product lists no sizes
    /// or no colors.
    pub fn quick_add(&mut self, product: &Product) -> Result<&CartLine, CartError> {
        let (Some(size), Some(color)) = (product.sizes.first(), product.primary_color()) else {
            return Err(CartError::NoDefaultVariant(product.id.clone()));
        };
        let (size, color) = (size.clone(), color.name.clone());
        self.add(product, &size, &color, Quantity::ONE)
    }

    /// Replace a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this key.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: Quantity) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.matches(key))
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this key.
    pub fn remove(&mut self, key: &LineKey) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.matches(key))
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        Ok(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines (the header badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Merchandise subtotal: sum of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines whose product ID is not in `catalog`.
    #[must_use]
    pub fn stale_lines<'a>(&'a self, catalog: &Catalog) -> Vec<&'a CartLine> {
        self.lines
            .iter()
            .filter(|l| !catalog.contains(&l.product_id))
            .collect()
    }
}
