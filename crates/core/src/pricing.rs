//! Shipping, tax and order totals.
//!
//! # Rules
//!
//! - Nothing to ship (subtotal of zero) costs nothing.
//! - Subtotals above [`FREE_SHIPPING_THRESHOLD`] ship free.
//! - Otherwise the fee comes from a fixed method × destination table.
//! - Tax of [`DOMESTIC_TAX_RATE`] applies to domestic orders only.
//!
//! Method and destination codes are validated when parsed, so every
//! calculation here is total.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subtotal above which shipping is waived.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Domestic sales tax rate (5%).
pub const DOMESTIC_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Errors from parsing pricing codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("unknown shipping method: {0}")]
    UnknownShippingMethod(String),
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}

/// Shipping speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Priority,
}

impl ShippingMethod {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Priority];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "priority" => Ok(Self::Priority),
            _ => Err(PricingError::UnknownShippingMethod(s.to_string())),
        }
    }
}

/// Shipping destination.
///
/// Canada is the domestic market; the United States is foreign but on the
/// same continent; everything else is international.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Destination {
    #[default]
    #[serde(rename = "CA")]
    Canada,
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "INTL")]
    International,
}

impl Destination {
    pub const ALL: [Self; 3] = [Self::Canada, Self::UnitedStates, Self::International];

    /// The destination code ("CA", "US" or "INTL").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Canada => "CA",
            Self::UnitedStates => "US",
            Self::International => "INTL",
        }
    }

    /// Whether orders to this destination are taxed.
    #[must_use]
    pub const fn is_domestic(self) -> bool {
        matches!(self, Self::Canada)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Destination {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CA" => Ok(Self::Canada),
            "US" => Ok(Self::UnitedStates),
            "INTL" => Ok(Self::International),
            _ => Err(PricingError::UnknownDestination(s.to_string())),
        }
    }
}

/// Flat fee for a method/destination pair, before the free-shipping rules.
#[must_use]
pub fn shipping_rate(method: ShippingMethod, destination: Destination) -> Decimal {
    use Destination::{Canada, International, UnitedStates};
    use ShippingMethod::{Express, Priority, Standard};

    let fee: i64 = match (method, destination) {
        (Standard, Canada) => 10,
        (Standard, UnitedStates) => 15,
        (Standard, International) => 20,
        (Express, Canada | UnitedStates) => 25,
        (Express, International) => 30,
        (Priority, Canada) => 35,
        (Priority, UnitedStates | International) => 50,
    };
    Decimal::from(fee)
}

/// Shipping fee for an order.
#[must_use]
pub fn calculate_shipping(
    subtotal: Decimal,
    method: ShippingMethod,
    destination: Destination,
) -> Decimal {
    if subtotal.is_zero() || subtotal > FREE_SHIPPING_THRESHOLD {
        return Decimal::ZERO;
    }
    shipping_rate(method, destination)
}

/// Tax owed on an order.
#[must_use]
pub fn calculate_tax(subtotal: Decimal, destination: Destination) -> Decimal {
    if destination.is_domestic() {
        subtotal * DOMESTIC_TAX_RATE
    } else {
        Decimal::ZERO
    }
}

/// The priced totals shown in the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Sum of price × quantity over all lines.
    pub merchandise: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    /// Merchandise + shipping + tax.
    pub total: Decimal,
}

/// Price an order.
#[must_use]
pub fn summarize(
    subtotal: Decimal,
    method: ShippingMethod,
    destination: Destination,
) -> OrderSummary {
    let shipping = calculate_shipping(subtotal, method, destination);
    let tax = calculate_tax(subtotal, destination);
    OrderSummary {
        merchandise: subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dollars(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_constants() {
        assert_eq!(FREE_SHIPPING_THRESHOLD, dollars(500));
        assert_eq!(DOMESTIC_TAX_RATE, Decimal::new(5, 2));
    }

    #[test]
    fn test_domestic_standard_order() {
        assert_eq!(
            calculate_shipping(dollars(100), ShippingMethod::Standard, Destination::Canada),
            dollars(10)
        );
        assert_eq!(calculate_tax(dollars(100), Destination::Canada), dollars(5));
        let summary = summarize(dollars(100), ShippingMethod::Standard, Destination::Canada);
        assert_eq!(summary.total, dollars(115));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        for method in ShippingMethod::ALL {
            for destination in Destination::ALL {
                assert_eq!(
                    calculate_shipping(dollars(600), method, destination),
                    Decimal::ZERO
                );
            }
        }
    }

    #[test]
    fn test_threshold_itself_is_not_free() {
        assert_eq!(
            calculate_shipping(dollars(500), ShippingMethod::Express, Destination::International),
            dollars(30)
        );
    }

    #[test]
    fn test_empty_order_ships_free() {
        let summary = summarize(Decimal::ZERO, ShippingMethod::Priority, Destination::Canada);
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_rate_table() {
        let expected = [
            (ShippingMethod::Standard, [10, 15, 20]),
            (ShippingMethod::Express, [25, 25, 30]),
            (ShippingMethod::Priority, [35, 50, 50]),
        ];
        for (method, fees) in expected {
            for (destination, fee) in Destination::ALL.into_iter().zip(fees) {
                assert_eq!(shipping_rate(method, destination), dollars(fee));
            }
        }
    }

    #[test]
    fn test_foreign_orders_are_untaxed() {
        assert_eq!(calculate_tax(dollars(100), Destination::International), Decimal::ZERO);
        assert_eq!(calculate_tax(dollars(100), Destination::UnitedStates), Decimal::ZERO);
        let summary = summarize(dollars(100), ShippingMethod::Priority, Destination::UnitedStates);
        assert_eq!(summary.total, dollars(150));
    }

    #[test]
    fn test_fractional_tax_is_not_rounded() {
        assert_eq!(
            calculate_tax(Decimal::new(3333, 2), Destination::Canada),
            Decimal::new(16665, 4)
        );
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("express".parse::<ShippingMethod>().unwrap(), ShippingMethod::Express);
        assert_eq!("intl".parse::<Destination>().unwrap(), Destination::International);
        assert_eq!(
            "drone".parse::<ShippingMethod>(),
            Err(PricingError::UnknownShippingMethod("drone".to_string()))
        );
        assert_eq!(
            "MX".parse::<Destination>(),
            Err(PricingError::UnknownDestination("MX".to_string()))
        );
    }

    #[test]
    fn test_destination_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Destination::UnitedStates).unwrap(), "\"US\"");
    }
}
