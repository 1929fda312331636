//! Plain-text rendering of lists, cart and summary.
//!
//! Every function writes to an `io::Write` so output can be captured in
//! tests. Nothing here computes prices or filters; it only formats values
//! produced by the storefront.

use std::io::{self, Write};

use wardrobe_core::catalog::Facets;
use wardrobe_core::{
    Cart, FilterSelection, OrderSummary, Product, SortSetting, capitalize, format_money,
};
use wardrobe_storefront::{Notice, NoticeLevel};

/// One product as a single list row.
pub fn product_row(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:<32} {:>10}  {} - {}",
        product.id,
        product.name,
        format_money(product.price),
        product.gender,
        product.category
    )
}

/// The browse view: active filter chips, result count, then the rows.
pub fn product_list(
    out: &mut impl Write,
    products: &[&Product],
    filters: &FilterSelection,
    sort: SortSetting,
) -> io::Result<()> {
    let chips: Vec<String> = filters
        .chips()
        .map(|(dimension, value)| format!("{dimension}:{value}"))
        .collect();
    if !chips.is_empty() {
        writeln!(out, "Filters: {}", chips.join(", "))?;
    }
    writeln!(
        out,
        "{} results (sorted by {} {})",
        products.len(),
        sort.field,
        sort.direction.label()
    )?;

    if products.is_empty() {
        writeln!(out, "No products match the selected filters.")?;
        return Ok(());
    }
    for product in products {
        product_row(out, product)?;
    }
    Ok(())
}

/// The product detail view, with related products underneath.
pub fn product_detail(
    out: &mut impl Write,
    product: &Product,
    related: &[&Product],
) -> io::Result<()> {
    writeln!(
        out,
        "Home > {} > {} > {}",
        product.gender.label(),
        product.category,
        product.name
    )?;
    writeln!(out, "{}  {}", product.name, format_money(product.price))?;
    writeln!(out, "{}", product.description)?;
    writeln!(out, "Material: {}", product.material)?;
    writeln!(out, "Sizes: {}", product.sizes.join(", "))?;
    let colors: Vec<String> = product
        .color
        .iter()
        .map(|c| format!("{} ({})", c.name, c.hex))
        .collect();
    writeln!(out, "Colors: {}", colors.join(", "))?;

    if !related.is_empty() {
        writeln!(out)?;
        writeln!(out, "You may also like:")?;
        for p in related {
            product_row(out, p)?;
        }
    }
    Ok(())
}

/// Available filter values.
pub fn facets(out: &mut impl Write, facets: &Facets) -> io::Result<()> {
    let genders: Vec<String> = facets.genders.iter().map(|g| g.label()).collect();
    writeln!(out, "Gender:   {}", genders.join(", "))?;
    writeln!(out, "Category: {}", facets.categories.join(", "))?;
    writeln!(out, "Size:     {}", facets.sizes.join(", "))?;
    writeln!(out, "Color:    {}", facets.colors.join(", "))
}

/// The cart table.
pub fn cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    writeln!(
        out,
        "{:<32} {:<10} {:<6} {:>10} {:>5} {:>10}",
        "Item", "Color", "Size", "Price", "Qty", "Subtotal"
    )?;
    for line in cart.lines() {
        writeln!(
            out,
            "{:<32} {:<10} {:<6} {:>10} {:>5} {:>10}",
            line.name,
            line.color,
            line.size,
            format_money(line.price),
            line.quantity,
            format_money(line.line_total())
        )?;
    }
    writeln!(out, "Items in cart: {}", cart.total_quantity())
}

/// The priced order summary.
pub fn summary(out: &mut impl Write, summary: &OrderSummary) -> io::Result<()> {
    writeln!(out, "Merchandise: {:>10}", format_money(summary.merchandise))?;
    writeln!(out, "Shipping:    {:>10}", format_money(summary.shipping))?;
    writeln!(out, "Tax:         {:>10}", format_money(summary.tax))?;
    writeln!(out, "Total:       {:>10}", format_money(summary.total))
}

/// Transient notices, one per line.
pub fn notices(out: &mut impl Write, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        let marker = match notice.level {
            NoticeLevel::Info => "*",
            NoticeLevel::Error => "!",
        };
        writeln!(out, "{marker} {}", capitalize(&notice.message))?;
    }
    Ok(())
}
