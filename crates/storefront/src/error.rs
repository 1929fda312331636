//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for every storefront operation. Front
//! ends call [`AppError::report`] before showing a message so that storage
//! and catalog failures reach Sentry.

use thiserror::Error;
use wardrobe_core::{CartError, ProductId};

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Catalog feed could not be fetched.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

impl AppError {
    /// Whether the error was caused by user input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Cart(_) | Self::ProductNotFound(_))
    }

    /// Capture system errors to Sentry and log them.
    ///
    /// User errors are only logged at debug level.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::debug!(error = %self, "Rejected request");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Storefront error"
        );
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(_) => "Could not access saved state".to_string(),
            Self::Catalog(_) => "Error loading products".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::ProductNotFound(ProductId::new("product-123"));
        assert_eq!(err.to_string(), "Product not found: product-123");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(AppError::ProductNotFound(ProductId::new("x")).is_user_error());
        assert!(AppError::Cart(CartError::NoDefaultVariant(ProductId::new("x"))).is_user_error());
        assert!(!AppError::Catalog(CatalogError::Status(500)).is_user_error());
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::Catalog(CatalogError::Status(502));
        assert_eq!(err.user_message(), "Error loading products");

        let err = AppError::Store(StoreError::Io {
            path: "state.json".into(),
            source: std::io::ErrorKind::NotFound.into(),
        });
        assert_eq!(err.user_message(), "Could not access saved state");

        let err = AppError::Cart(CartError::NoDefaultVariant(ProductId::new("9")));
        assert_eq!(
            err.user_message(),
            "Cart error: product 9 has no default size and color"
        );
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        AppError::Catalog(CatalogError::Status(500)).report();
        add_breadcrumb("cart", "Removed line", Some(&[("product_id", "1")]));
    }
}
