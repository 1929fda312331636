//! The in-memory product catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Gender, Product, ProductId};

/// Number of products shown on the home page.
pub const FEATURED_COUNT: usize = 4;

/// Number of related products shown on a product page.
pub const RELATED_COUNT: usize = 4;

/// The full list of purchasable products for a session.
///
/// Serializes as a plain JSON array, the same shape as the catalog feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in feed order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products (e.g., after a failed fetch).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Whether a product with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// The first `n` products, used as the home page selection.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        self.products.get(..n.min(self.products.len())).unwrap_or_default()
    }

    /// Up to `n` other products sharing gender and category with `product`,
    /// in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product, n: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                p.id != product.id && p.gender == product.gender && p.category == product.category
            })
            .take(n)
            .collect()
    }

    /// Scan every product for the values offered as filter options.
    #[must_use]
    pub fn facets(&self) -> Facets {
        let mut genders: Vec<Gender> = Vec::new();
        let mut categories = BTreeSet::new();
        let mut sizes = BTreeSet::new();
        let mut colors = BTreeSet::new();

        for product in &self.products {
            if !product.gender.as_str().is_empty() && !genders.contains(&product.gender) {
                genders.push(product.gender.clone());
            }
            if !product.category.is_empty() {
                categories.insert(product.category.clone());
            }
            sizes.extend(product.sizes.iter().cloned());
            colors.extend(product.color.iter().map(|c| c.name.clone()));
        }

        Facets {
            genders,
            categories: categories.into_iter().collect(),
            sizes: sizes.into_iter().collect(),
            colors: colors.into_iter().collect(),
        }
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

/// Distinct filter values found in a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Genders in first-seen order.
    pub genders: Vec<Gender>,
    /// Categories, sorted.
    pub categories: Vec<String>,
    /// Sizes, sorted.
    pub sizes: Vec<String>,
    /// Color names, sorted.
    pub colors: Vec<String>,
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::sample;
    use super::*;

    #[test]
    fn test_feed_entry_missing_category_still_loads() {
        let catalog: Catalog = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Tee", "price": 20, "gender": "mens", "category": "Tops", "sizes": ["M"]},
                {"id": 2, "name": "Scarf", "price": 15, "sizes": ["M"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);

        let facets = catalog.facets();
        assert_eq!(facets.genders, vec![Gender::Mens]);
        assert_eq!(facets.categories, vec!["Tops".to_string()]);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(sample());
        assert_eq!(catalog.get(&ProductId::new("3")).map(|p| p.name.as_str()), Some("Wool Sweater"));
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_featured_caps_at_catalog_size() {
        let catalog = Catalog::new(sample());
        assert_eq!(catalog.featured(FEATURED_COUNT).len(), 4);
        assert_eq!(catalog.featured(50).len(), 6);
        assert!(Catalog::default().featured(FEATURED_COUNT).is_empty());
    }

    #[test]
    fn test_related_shares_gender_and_category() {
        let catalog = Catalog::new(sample());
        let sweater = catalog.get(&ProductId::new("3")).cloned().expect("fixture");
        let related: Vec<&str> = catalog
            .related(&sweater, RELATED_COUNT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, vec!["5"]);
    }

    #[test]
    fn test_related_respects_limit() {
        let catalog = Catalog::new(sample());
        let shirt = catalog.get(&ProductId::new("1")).cloned().expect("fixture");
        assert_eq!(catalog.related(&shirt, 1).len(), 1);
        assert_eq!(catalog.related(&shirt, RELATED_COUNT).len(), 1);
    }

    #[test]
    fn test_facets() {
        let facets = Catalog::new(sample()).facets();
        assert_eq!(facets.genders, vec![Gender::Mens, Gender::Womens]);
        assert_eq!(facets.categories, vec!["Bottoms", "Outerwear", "Tops"]);
        assert_eq!(facets.sizes, vec!["L", "M", "S", "XL", "XS"]);
        assert_eq!(facets.colors, vec!["Blue", "Grey", "Olive", "Red", "White"]);
    }

    #[test]
    fn test_catalog_is_a_json_array() {
        let catalog = Catalog::new(sample());
        let json = serde_json::to_value(&catalog).expect("serialize");
        assert!(json.is_array());
    }
}
