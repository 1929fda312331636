//! Catalog feed client.
//!
//! The product feed is one unauthenticated JSON array behind a fixed URL,
//! fetched at most once per session. There is no pagination and no retry:
//! a failed fetch is reported to the caller, who decides what to show.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;
use wardrobe_core::{Catalog, Product};

use crate::config::StorefrontConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Unexpected status {0} from catalog feed")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce the product catalog.
pub trait CatalogSource {
    /// Fetch the full catalog.
    fn fetch(&self) -> impl Future<Output = Result<Catalog, CatalogError>>;
}

/// HTTP client for the product feed.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    url: Url,
}

impl CatalogClient {
    /// Create a client for the configured feed URL.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("wardrobe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                url: config.catalog_url.clone(),
            }),
        })
    }

    /// The feed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }
}

impl CatalogSource for CatalogClient {
    #[instrument(skip(self), fields(url = %self.inner.url))]
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.url.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let catalog = decode_feed(&body)?;
        debug!(count = catalog.len(), "Fetched catalog");

        Ok(catalog)
    }
}

/// Decode the feed body entry by entry.
///
/// The body must be a JSON array. Entries that cannot be read as a product
/// (no id or price) are skipped with a warning instead of failing the feed.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the body is not a JSON array.
pub fn decode_feed(body: &str) -> Result<Catalog, CatalogError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let products = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            serde_json::from_value::<Product>(entry)
                .inspect_err(|e| warn!(index, error = %e, "Skipping unreadable catalog entry"))
                .ok()
        })
        .collect();
    Ok(Catalog::new(products))
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("url", &self.inner.url.as_str())
            .finish_non_exhaustive()
    }
}
