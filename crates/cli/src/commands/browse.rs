//! Catalog browsing commands.

use std::io::Write;

use wardrobe_core::catalog::{FEATURED_COUNT, RELATED_COUNT};
use wardrobe_core::{FilterDimension, ProductId, SortDirection, SortField, SortSetting};
use wardrobe_storefront::{KeyValueStore, Storefront};

use crate::{CliError, render};

/// Filter and sort options of the `browse` command.
#[derive(Debug, Default)]
pub struct Selection {
    pub gender: Vec<String>,
    pub category: Vec<String>,
    pub size: Vec<String>,
    pub color: Vec<String>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
}

/// Apply the selection and print the matching products.
pub fn list<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    selection: &Selection,
) -> Result<(), CliError> {
    let filters = storefront.filters_mut();
    for (dimension, values) in [
        (FilterDimension::Gender, &selection.gender),
        (FilterDimension::Category, &selection.category),
        (FilterDimension::Size, &selection.size),
        (FilterDimension::Color, &selection.color),
    ] {
        for value in values {
            filters.toggle(dimension, value, true);
        }
    }

    let current = storefront.sort();
    storefront.set_sort(SortSetting::new(
        selection.sort.unwrap_or(current.field),
        selection.direction.unwrap_or(current.direction),
    ));

    render::product_list(
        out,
        &storefront.browse(),
        storefront.filters(),
        storefront.sort(),
    )?;
    Ok(())
}

/// Print the values each filter can take.
pub fn facets<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    render::facets(out, &storefront.catalog().facets())?;
    Ok(())
}

/// Print the home page selection.
pub fn featured<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for product in storefront.catalog().featured(FEATURED_COUNT) {
        render::product_row(out, product)?;
    }
    Ok(())
}

/// Print one product with its related products.
pub fn show<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    id: &str,
) -> Result<(), CliError> {
    let product = storefront.product(&ProductId::from(id))?;
    let related = storefront.catalog().related(product, RELATED_COUNT);
    render::product_detail(out, product, &related)?;
    Ok(())
}

/// Confirm a refetch.
pub fn refreshed<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    writeln!(out, "Catalog holds {} products", storefront.catalog().len())?;
    Ok(())
}
