//! Integration tests for Wardrobe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wardrobe-integration-tests
//! ```
//!
//! No network access is needed: catalog fetches go to a [`FixtureServer`]
//! bound to a random local port.
//!
//! # Test Categories
//!
//! - `catalog_fetch` - HTTP fetch, caching and failure handling
//! - `cart_persistence` - Cart state across sessions on disk
//! - `properties` - Filter, sort, cart and pricing behavior end to end

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wardrobe_storefront::{ConfigError, StorefrontConfig};

/// A small catalog in the shape of the public feed, with numeric ids.
pub const CATALOG_JSON: &str = r##"[
  {"id": 1, "name": "Linen Shirt", "gender": "mens", "category": "Tops", "price": 49.99,
   "material": "Linen", "description": "Breathable shirt",
   "sizes": ["S", "M", "L"], "color": [{"name": "White", "hex": "#ffffff"}]},
  {"id": 2, "name": "Wool Sweater", "gender": "womens", "category": "Tops", "price": 65,
   "material": "Wool", "description": "Warm knit",
   "sizes": ["XS", "S"], "color": [{"name": "Grey", "hex": "#808080"}, {"name": "Red", "hex": "#c0392b"}]},
  {"id": 3, "name": "Cargo Pants", "gender": "mens", "category": "Bottoms", "price": 55,
   "material": "Cotton", "description": "Utility pockets",
   "sizes": ["L", "XL"], "color": [{"name": "Olive", "hex": "#556b2f"}]},
  {"id": 4, "name": "Silk Blouse", "gender": "womens", "category": "Tops", "price": 72,
   "material": "Silk", "description": "Light and soft",
   "sizes": ["M"], "color": [{"name": "Red", "hex": "#c0392b"}]},
  {"id": 5, "name": "Henley Tee", "gender": "mens", "category": "Tops", "price": 25,
   "material": "Cotton", "description": "Three-button placket",
   "sizes": ["S", "M", "L"], "color": [{"name": "Grey", "hex": "#808080"}]}
]"##;

/// Minimal HTTP server answering every request with one canned response.
pub struct FixtureServer {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    /// Serve `body` with status `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if no local port can be bound.
    pub async fn ok(body: &str) -> io::Result<Self> {
        Self::start("200 OK", body).await
    }

    /// Serve an error status with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if no local port can be bound.
    pub async fn failing(status: &str) -> io::Result<Self> {
        Self::start(status, "").await
    }

    async fn start(status: &str, body: &str) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = response.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0_u8; 1024];
                    while let Ok(n) = socket.read(&mut buf).await {
                        if n == 0 {
                            break;
                        }
                        request.extend_from_slice(buf.get(..n).unwrap_or_default());
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Ok(Self {
            url: format!("http://{addr}/clothing.json"),
            hits,
        })
    }

    /// The feed URL to configure.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of connections accepted so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Configuration pointing at `catalog_url`, keeping state in `state_path`.
///
/// # Errors
///
/// Returns `ConfigError` if the URL is not http or https.
pub fn config_for(catalog_url: &str, state_path: &Path) -> Result<StorefrontConfig, ConfigError> {
    let state_path = state_path.display().to_string();
    StorefrontConfig::from_lookup(|key| match key {
        "WARDROBE_CATALOG_URL" => Some(catalog_url.to_string()),
        "WARDROBE_STATE_PATH" => Some(state_path.clone()),
        "WARDROBE_HTTP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
}
