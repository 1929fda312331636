//! Pricing and checkout commands.

use std::io::Write;

use wardrobe_core::{Destination, ShippingMethod};
use wardrobe_storefront::{KeyValueStore, Storefront};

use crate::{CliError, render};

/// Print the cart and its priced summary.
pub fn summary<S: KeyValueStore>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
    method: ShippingMethod,
    destination: Destination,
) -> Result<(), CliError> {
    render::cart(out, storefront.cart())?;
    writeln!(out)?;
    writeln!(out, "Shipping {method} to {destination}")?;
    render::summary(out, &storefront.summary(method, destination))?;
    Ok(())
}

/// Complete the order, printing what was charged.
pub fn checkout<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    method: ShippingMethod,
    destination: Destination,
) -> Result<(), CliError> {
    match storefront.checkout(method, destination)? {
        Some(order) => render::summary(out, &order)?,
        None => writeln!(out, "Your cart is empty.")?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wardrobe_storefront::NoticeLevel;

    use super::*;
    use crate::commands::cart::add;
    use crate::commands::fixtures::{output, storefront};

    #[test]
    fn test_summary_for_canada() {
        let mut sf = storefront();
        // 2 x 45.00 + 1 x 15.00 = 105.00
        add(&mut sf, &mut Vec::new(), "1", "M", "Navy", "2").unwrap();
        add(&mut sf, &mut Vec::new(), "3", "S", "Navy", "1").unwrap();

        let mut buf = Vec::new();
        summary(&sf, &mut buf, ShippingMethod::Standard, Destination::Canada).unwrap();
        let text = output(buf);
        assert!(text.contains("Merchandise:    $105.00"));
        assert!(text.contains("Shipping:        $10.00"));
        assert!(text.contains("Tax:              $5.25"));
        assert!(text.contains("Total:          $120.25"));
    }

    #[test]
    fn test_checkout_clears_cart() {
        let mut sf = storefront();
        add(&mut sf, &mut Vec::new(), "4", "M", "Navy", "1").unwrap();
        sf.take_notices();

        let mut buf = Vec::new();
        checkout(&mut sf, &mut buf, ShippingMethod::Express, Destination::UnitedStates).unwrap();
        assert!(output(buf).contains("Total:          $145.00"));
        assert!(sf.cart().is_empty());

        let notices = sf.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.first().unwrap().level, NoticeLevel::Info);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut sf = storefront();
        let mut buf = Vec::new();
        checkout(&mut sf, &mut buf, ShippingMethod::Standard, Destination::Canada).unwrap();
        assert_eq!(output(buf), "Your cart is empty.\n");
        assert!(sf.take_notices().is_empty());
    }
}
