//! Wardrobe Core - Catalog browsing and cart domain library.
//!
//! This crate provides the domain types and pure computations shared by the
//! Wardrobe components:
//! - `storefront` - Application state, persistence and catalog loading
//! - `cli` - Command-line front end that renders lists, cart and summary
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. Every aggregate (cart quantity, line
//! totals, subtotal) is recomputed from the current lines on demand.
//!
//! # Modules
//!
//! - [`types`] - Product records, IDs, quantities and money formatting
//! - [`catalog`] - The in-memory product list with facets and related products
//! - [`filter`] - The four-dimension filter selection and predicate
//! - [`sort`] - Sort field/direction and the product comparator
//! - [`cart`] - The cart ledger with merge-on-add semantics
//! - [`pricing`] - Shipping, tax and order summary calculation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod filter;
pub mod pricing;
pub mod sort;
pub mod types;

pub use cart::{Cart, CartError, CartLine, LineKey};
pub use catalog::{Catalog, Facets};
pub use filter::{FilterDimension, FilterSelection, apply_filters};
pub use pricing::{Destination, OrderSummary, PricingError, ShippingMethod, summarize};
pub use sort::{SortDirection, SortField, SortSetting, apply_sort};
pub use types::*;
