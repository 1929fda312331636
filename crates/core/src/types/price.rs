//! Money display helpers.
//!
//! Prices are plain [`Decimal`] amounts in the store currency (dollars, not
//! cents). Arithmetic is never rounded; rounding to two decimals happens
//! only at display time.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display (e.g., `$19.99`).
///
/// Rounds half away from zero to two decimal places, matching the usual
/// currency display of the storefront.
///
/// ```rust
/// # use rust_decimal::Decimal;
/// # use wardrobe_core::format_money;
/// assert_eq!(format_money(Decimal::new(5, 0)), "$5.00");
/// assert_eq!(format_money(Decimal::new(12345, 3)), "$12.35");
/// ```
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(format_money(Decimal::new(115, 0)), "$115.00");
    }

    #[test]
    fn test_format_fractional_tax() {
        // 5% of 33.33
        assert_eq!(format_money(Decimal::new(16665, 4)), "$1.67");
    }

    #[test]
    fn test_format_keeps_trailing_zero() {
        assert_eq!(format_money(Decimal::new(125, 1)), "$12.50");
    }
}
