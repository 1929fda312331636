//! Wardrobe Storefront library.
//!
//! Owns everything between the pure domain types in `wardrobe-core` and a
//! display layer:
//!
//! - [`config`] - Environment configuration
//! - [`catalog`] - One-time HTTP fetch of the product feed
//! - [`store`] - Key-value persistence standing in for browser local storage
//! - [`state`] - The [`Storefront`] application state and its mutations
//! - [`error`] - Unified error type with Sentry reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub use catalog::{CatalogClient, CatalogError, CatalogSource, decode_feed};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{AppError, Result};
pub use state::{
    Notice, NoticeLevel, STORAGE_CART_KEY, STORAGE_PRODUCTS_KEY, Storefront, invalidate_catalog_cache,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
