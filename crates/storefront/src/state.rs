//! Storefront application state.
//!
//! [`Storefront`] owns the catalog, the cart, the filter selection and the
//! sort setting, plus the store they persist to. Front ends hold one value
//! and call methods on it; there is no ambient global state.
//!
//! Every cart mutation is followed immediately by a write of the whole
//! ledger.

use tracing::{error, info, instrument, warn};
use wardrobe_core::{
    Cart, CartLine, Catalog, Destination, FilterSelection, LineKey, OrderSummary, Product,
    ProductId, Quantity, ShippingMethod, SortDirection, SortField, SortSetting, apply_filters,
    apply_sort, summarize,
};

use crate::catalog::{CatalogSource, decode_feed};
use crate::error::{Result, add_breadcrumb};
use crate::store::{KeyValueStore, StoreError};

/// Store key of the cached catalog.
pub const STORAGE_PRODUCTS_KEY: &str = "wardrobe_products";

/// Store key of the cart ledger.
pub const STORAGE_CART_KEY: &str = "wardrobe_cart";

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short message for the user, shown once (a "toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The application state for one browsing session.
#[derive(Debug)]
pub struct Storefront<S> {
    store: S,
    catalog: Catalog,
    cart: Cart,
    filters: FilterSelection,
    sort: SortSetting,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Start a session: restore the cart, then load the catalog.
    ///
    /// The catalog comes from the store when cached; otherwise it is fetched
    /// once from `source` and cached. A failed fetch leaves the catalog empty
    /// and queues an error notice; it is not retried.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store cannot be read. A fetched
    /// catalog that cannot be cached is still used for the session.
    #[instrument(skip_all)]
    pub async fn open<C: CatalogSource>(store: S, source: &C) -> Result<Self> {
        let mut storefront = Self::with_catalog(store, Catalog::default())?;

        match storefront.cached_catalog()? {
            Some(catalog) => {
                info!(products = catalog.len(), "Loaded catalog from cache");
                storefront.catalog = catalog;
            }
            None => match source.fetch().await {
                Ok(catalog) => {
                    info!(products = catalog.len(), "Fetched catalog");
                    if let Err(e) = storefront.cache_catalog(&catalog) {
                        warn!(error = %e, "Failed to cache catalog");
                    }
                    storefront.catalog = catalog;
                }
                Err(e) => {
                    error!(error = %e, "Failed to load catalog");
                    storefront.notices.push(Notice::error("Error loading products"));
                }
            },
        }

        storefront.warn_stale_lines();
        Ok(storefront)
    }

    /// Start a session over an already loaded catalog, restoring the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store cannot be read.
    pub fn with_catalog(store: S, catalog: Catalog) -> Result<Self> {
        let cart = restore_cart(&store)?;
        let storefront = Self {
            store,
            catalog,
            cart,
            filters: FilterSelection::default(),
            sort: SortSetting::default(),
            notices: Vec::new(),
        };
        if !storefront.catalog.is_empty() {
            storefront.warn_stale_lines();
        }
        Ok(storefront)
    }

    fn cached_catalog(&self) -> Result<Option<Catalog>> {
        let Some(raw) = self.store.get(STORAGE_PRODUCTS_KEY)? else {
            return Ok(None);
        };
        match decode_feed(&raw) {
            Ok(catalog) => Ok(Some(catalog)),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed cached catalog");
                Ok(None)
            }
        }
    }

    fn cache_catalog(&mut self, catalog: &Catalog) -> std::result::Result<(), StoreError> {
        let encoded = serde_json::to_string(catalog)?;
        self.store.set(STORAGE_PRODUCTS_KEY, encoded)
    }

    fn warn_stale_lines(&self) {
        let stale = self.cart.stale_lines(&self.catalog);
        if !stale.is_empty() {
            let ids: Vec<&str> = stale.iter().map(|l| l.product_id.as_str()).collect();
            warn!(?ids, "Cart references products missing from the catalog");
        }
    }

    /// Apply `change` to a copy of the cart, persist the copy, then keep it.
    ///
    /// The in-memory cart is untouched when the change or the write fails.
    fn commit_cart<T>(
        &mut self,
        change: impl FnOnce(&mut Cart, &Catalog) -> Result<T>,
    ) -> Result<T> {
        let mut cart = self.cart.clone();
        let value = change(&mut cart, &self.catalog)?;
        let encoded = serde_json::to_string(&cart).map_err(StoreError::from)?;
        self.store.set(STORAGE_CART_KEY, encoded)?;
        self.cart = cart;
        Ok(value)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Mutable access to the filter selection. Filters are not persisted.
    pub const fn filters_mut(&mut self) -> &mut FilterSelection {
        &mut self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> SortSetting {
        self.sort
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` if the catalog has no such product.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| crate::AppError::ProductNotFound(id.clone()))
    }

    /// The product list with the active filters and sort applied.
    #[must_use]
    pub fn browse(&self) -> Vec<&Product> {
        let filtered = apply_filters(self.catalog.products(), &self.filters);
        apply_sort(&filtered, self.sort)
    }

    pub const fn set_sort(&mut self, sort: SortSetting) {
        self.sort = sort;
    }

    pub const fn set_sort_field(&mut self, field: SortField) {
        self.sort.field = field;
    }

    /// Flip the sort direction, returning the new one.
    pub const fn toggle_sort_direction(&mut self) -> SortDirection {
        self.sort.direction = self.sort.direction.toggle();
        self.sort.direction
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product variant to the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound`, `AppError::Cart` for an unknown
    /// variant, or `AppError::Store` if the cart cannot be saved.
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        size: &str,
        color: &str,
        quantity: Quantity,
    ) -> Result<()> {
        self.commit_cart(|cart, catalog| {
            let product = catalog
                .get(id)
                .ok_or_else(|| crate::AppError::ProductNotFound(id.clone()))?;
            cart.add(product, size, color, quantity)?;
            Ok(())
        })?;

        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        self.notices.push(Notice::info("Added to cart"));
        Ok(())
    }

    /// Add one unit of a product's default size and color and persist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound`, `AppError::Cart` if the product
    /// has no default variant, or `AppError::Store`.
    pub fn quick_add(&mut self, id: &ProductId) -> Result<()> {
        self.commit_cart(|cart, catalog| {
            let product = catalog
                .get(id)
                .ok_or_else(|| crate::AppError::ProductNotFound(id.clone()))?;
            cart.quick_add(product)?;
            Ok(())
        })?;

        add_breadcrumb("cart", "Quick add", Some(&[("product_id", id.as_str())]));
        self.notices.push(Notice::info("Added to cart"));
        Ok(())
    }

    /// Change a line's quantity and persist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if the line does not exist, or
    /// `AppError::Store`.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: Quantity) -> Result<()> {
        self.commit_cart(|cart, _| {
            cart.update_quantity(key, quantity)?;
            Ok(())
        })
    }

    /// Remove a line and persist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if the line does not exist, or
    /// `AppError::Store`.
    pub fn remove_line(&mut self, key: &LineKey) -> Result<CartLine> {
        let line = self.commit_cart(|cart, _| Ok(cart.remove(key)?))?;
        add_breadcrumb(
            "cart",
            "Removed line",
            Some(&[("product_id", line.product_id.as_str())]),
        );
        Ok(line)
    }

    /// Price the current cart.
    #[must_use]
    pub fn summary(&self, method: ShippingMethod, destination: Destination) -> OrderSummary {
        summarize(self.cart.subtotal(), method, destination)
    }

    /// Complete the order: empty and persist the cart.
    ///
    /// Returns the final summary, or `None` when the cart was already empty.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the emptied cart cannot be saved.
    pub fn checkout(
        &mut self,
        method: ShippingMethod,
        destination: Destination,
    ) -> Result<Option<OrderSummary>> {
        if self.cart.is_empty() {
            return Ok(None);
        }

        let summary = self.summary(method, destination);
        self.commit_cart(|cart, _| {
            cart.clear();
            Ok(())
        })?;

        info!(
            total = %summary.total,
            method = %method,
            destination = %destination,
            "Checkout complete"
        );
        self.notices.push(Notice::info("Checkout complete"));
        Ok(Some(summary))
    }
}

/// Drop the cached catalog so the next session refetches it.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be written.
pub fn invalidate_catalog_cache<S: KeyValueStore>(store: &mut S) -> std::result::Result<bool, StoreError> {
    store.remove(STORAGE_PRODUCTS_KEY)
}

/// Read the persisted cart. Malformed data restores as an empty cart.
fn restore_cart<S: KeyValueStore>(store: &S) -> Result<Cart> {
    let Some(raw) = store.get(STORAGE_CART_KEY)? else {
        return Ok(Cart::new());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring malformed persisted cart");
        Cart::new()
    }))
}
