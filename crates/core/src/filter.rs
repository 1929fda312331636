//! Product filtering.
//!
//! A [`FilterSelection`] holds four independent value sets. An empty set
//! places no restriction on its dimension. The dimensions are AND'd
//! together; within size and color, any single match is enough.

use core::fmt;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{ParseError, Product};

/// One of the four filterable product attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Gender,
    Category,
    Size,
    Color,
}

impl FilterDimension {
    /// All dimensions in display order.
    pub const ALL: [Self; 4] = [Self::Gender, Self::Category, Self::Size, Self::Color];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Category => "category",
            Self::Size => "size",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gender" => Ok(Self::Gender),
            "category" => Ok(Self::Category),
            "size" => Ok(Self::Size),
            "color" => Ok(Self::Color),
            _ => Err(ParseError::new("filter dimension", s)),
        }
    }
}

/// The active filter values for each dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub gender: BTreeSet<String>,
    pub category: BTreeSet<String>,
    pub size: BTreeSet<String>,
    pub color: BTreeSet<String>,
}

impl FilterSelection {
    /// A selection with no restrictions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Gender => &self.gender,
            FilterDimension::Category => &self.category,
            FilterDimension::Size => &self.size,
            FilterDimension::Color => &self.color,
        }
    }

    fn set_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Gender => &mut self.gender,
            FilterDimension::Category => &mut self.category,
            FilterDimension::Size => &mut self.size,
            FilterDimension::Color => &mut self.color,
        }
    }

    /// Values currently selected for one dimension.
    #[must_use]
    pub fn values(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        self.set(dimension)
    }

    /// Select or deselect a value, as a checkbox change would.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str, checked: bool) {
        let set = self.set_mut(dimension);
        if checked {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
    }

    /// Remove one active value. Returns whether it was selected.
    pub fn remove(&mut self, dimension: FilterDimension, value: &str) -> bool {
        self.set_mut(dimension).remove(value)
    }

    /// Reset every dimension to unrestricted.
    pub fn clear(&mut self) {
        for dimension in FilterDimension::ALL {
            self.set_mut(dimension).clear();
        }
    }

    /// Whether no dimension is restricted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|&d| self.set(d).is_empty())
    }

    /// Active `(dimension, value)` pairs, gender first and color last.
    pub fn chips(&self) -> impl Iterator<Item = (FilterDimension, &str)> {
        FilterDimension::ALL.into_iter().flat_map(move |dimension| {
            self.set(dimension)
                .iter()
                .map(move |value| (dimension, value.as_str()))
        })
    }

    /// Whether `product` passes every active dimension.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let gender_ok = self.gender.is_empty() || self.gender.contains(product.gender.as_str());
        let category_ok = self.category.is_empty() || self.category.contains(&product.category);
        let size_ok = self.size.is_empty() || product.sizes.iter().any(|s| self.size.contains(s));
        let color_ok =
            self.color.is_empty() || product.color.iter().any(|c| self.color.contains(&c.name));

        gender_ok && category_ok && size_ok && color_ok
    }
}

/// Keep the products that match `selection`, preserving input order.
#[must_use]
pub fn apply_filters<'a>(products: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    products.iter().filter(|p| selection.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample;
    use crate::types::Gender;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let products = sample();
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(apply_filters(&products, &selection).len(), products.len());
    }

    #[test]
    fn test_dimensions_are_anded() {
        let products = sample();
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Gender, "womens", true);
        selection.toggle(FilterDimension::Category, "Tops", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), vec!["3", "5"]);
    }

    #[test]
    fn test_values_within_dimension_are_ored() {
        let products = sample();
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Size, "XL", true);
        selection.toggle(FilterDimension::Size, "XS", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), vec!["3", "4"]);
    }

    #[test]
    fn test_color_matches_any_variant() {
        let products = sample();
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Color, "Red", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), vec!["3", "5"]);
    }

    #[test]
    fn test_product_without_sizes_fails_size_filter() {
        let mut product = sample().remove(0);
        product.sizes.clear();
        let mut selection = FilterSelection::new();
        assert!(selection.matches(&product));
        selection.toggle(FilterDimension::Size, "M", true);
        assert!(!selection.matches(&product));
    }

    #[test]
    fn test_product_without_gender_or_category_fails_only_those_filters() {
        let mut products = sample();
        if let Some(shirt) = products.first_mut() {
            shirt.gender = Gender::default();
            shirt.category.clear();
        }

        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Size, "M", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), ["1", "2", "5", "6"]);

        selection.toggle(FilterDimension::Category, "Tops", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), ["5", "6"]);

        selection.clear();
        selection.toggle(FilterDimension::Gender, "mens", true);
        assert_eq!(ids(&apply_filters(&products, &selection)), ["4", "6"]);
    }

    #[test]
    fn test_predicate_agrees_with_rule_for_every_combination() {
        let products = sample();
        let genders = [None, Some("mens"), Some("womens")];
        let categories = [None, Some("Tops"), Some("Bottoms")];
        let sizes = [None, Some("M"), Some("XS")];
        let colors = [None, Some("Grey"), Some("Blue")];

        for g in genders {
            for c in categories {
                for s in sizes {
                    for col in colors {
                        let mut selection = FilterSelection::new();
                        if let Some(v) = g {
                            selection.toggle(FilterDimension::Gender, v, true);
                        }
                        if let Some(v) = c {
                            selection.toggle(FilterDimension::Category, v, true);
                        }
                        if let Some(v) = s {
                            selection.toggle(FilterDimension::Size, v, true);
                        }
                        if let Some(v) = col {
                            selection.toggle(FilterDimension::Color, v, true);
                        }
                        for p in &products {
                            let expected = g.is_none_or(|v| p.gender.as_str() == v)
                                && c.is_none_or(|v| p.category == v)
                                && s.is_none_or(|v| p.sizes.iter().any(|x| x == v))
                                && col.is_none_or(|v| p.color.iter().any(|x| x.name == v));
                            assert_eq!(selection.matches(p), expected, "product {}", p.id);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_toggle_remove_and_clear() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Color, "Red", true);
        selection.toggle(FilterDimension::Gender, "mens", true);
        let chips: Vec<_> = selection.chips().collect();
        assert_eq!(
            chips,
            vec![(FilterDimension::Gender, "mens"), (FilterDimension::Color, "Red")]
        );

        selection.toggle(FilterDimension::Color, "Red", false);
        assert!(selection.values(FilterDimension::Color).is_empty());
        assert!(selection.remove(FilterDimension::Gender, "mens"));
        assert!(!selection.remove(FilterDimension::Gender, "mens"));

        selection.toggle(FilterDimension::Size, "S", true);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("size".parse::<FilterDimension>(), Ok(FilterDimension::Size));
        assert!("brand".parse::<FilterDimension>().is_err());
    }
}
