//! Cart commands.

use std::io::Write;

use wardrobe_core::{LineKey, ProductId, Quantity};
use wardrobe_storefront::{KeyValueStore, Storefront};

use crate::{CliError, render};

/// Print the cart.
pub fn show<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    render::cart(out, storefront.cart())?;
    Ok(())
}

/// Add a variant, then print the cart.
pub fn add<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &str,
    size: &str,
    color: &str,
    quantity: &str,
) -> Result<(), CliError> {
    storefront.add_to_cart(
        &ProductId::from(id),
        size,
        color,
        Quantity::parse_lenient(quantity),
    )?;
    show(storefront, out)
}

/// Add the product's default variant, then print the cart.
pub fn quick_add<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &str,
) -> Result<(), CliError> {
    storefront.quick_add(&ProductId::from(id))?;
    show(storefront, out)
}

/// Set a line's quantity, then print the cart.
pub fn update<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &str,
    size: &str,
    color: &str,
    quantity: &str,
) -> Result<(), CliError> {
    let key = LineKey::new(ProductId::from(id), size, color);
    storefront.update_quantity(&key, Quantity::parse_lenient(quantity))?;
    show(storefront, out)
}

/// Remove a line, then print the cart.
pub fn remove<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    id: &str,
    size: &str,
    color: &str,
) -> Result<(), CliError> {
    let key = LineKey::new(ProductId::from(id), size, color);
    let line = storefront.remove_line(&key)?;
    writeln!(out, "Removed {} ({}, {})", line.name, line.size, line.color)?;
    show(storefront, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wardrobe_core::CartError;
    use wardrobe_storefront::AppError;

    use super::*;
    use crate::commands::fixtures::{output, storefront};

    #[test]
    fn test_add_twice_merges_line() {
        let mut sf = storefront();
        add(&mut sf, &mut Vec::new(), "1", "M", "Navy", "2").unwrap();
        let mut buf = Vec::new();
        add(&mut sf, &mut buf, "1", "M", "Navy", "3").unwrap();

        assert_eq!(sf.cart().len(), 1);
        assert!(output(buf).contains("Items in cart: 5"));
    }

    #[test]
    fn test_add_coerces_bad_quantity() {
        let mut sf = storefront();
        add(&mut sf, &mut Vec::new(), "1", "S", "Navy", "-4").unwrap();
        add(&mut sf, &mut Vec::new(), "3", "S", "Navy", "lots").unwrap();
        assert_eq!(sf.cart().total_quantity(), 2);
    }

    #[test]
    fn test_add_rejects_unknown_size() {
        let mut sf = storefront();
        let err = add(&mut sf, &mut Vec::new(), "1", "XXL", "Navy", "1").unwrap_err();
        assert!(matches!(
            err,
            CliError::App(AppError::Cart(CartError::UnknownSize { .. }))
        ));
        assert!(sf.cart().is_empty());
    }

    #[test]
    fn test_quick_add_uses_first_variant() {
        let mut sf = storefront();
        let mut buf = Vec::new();
        quick_add(&mut sf, &mut buf, "2").unwrap();

        let line = sf.cart().lines().first().unwrap();
        assert_eq!(line.size, "S");
        assert_eq!(line.color, "Navy");
        assert!(output(buf).contains("Wrap Dress"));
    }

    #[test]
    fn test_update_and_remove() {
        let mut sf = storefront();
        add(&mut sf, &mut Vec::new(), "1", "M", "Navy", "1").unwrap();
        update(&mut sf, &mut Vec::new(), "1", "M", "Navy", "4").unwrap();
        assert_eq!(sf.cart().total_quantity(), 4);

        let mut buf = Vec::new();
        remove(&mut sf, &mut buf, "1", "M", "Navy").unwrap();
        let text = output(buf);
        assert!(text.starts_with("Removed Oxford Shirt (M, Navy)"));
        assert!(text.contains("Your cart is empty."));
    }

    #[test]
    fn test_remove_missing_line() {
        let mut sf = storefront();
        let err = remove(&mut sf, &mut Vec::new(), "1", "M", "Navy").unwrap_err();
        assert!(matches!(
            err,
            CliError::App(AppError::Cart(CartError::LineNotFound(_)))
        ));
    }
}
