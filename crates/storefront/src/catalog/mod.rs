//! Catalog and stock service access.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart store codes against
//! - [`CatalogClient`] talks to the REST API with `reqwest`
//! - [`InMemoryCatalog`] serves fixed data for local development and tests
//!
//! Product details are cached by the HTTP client (`moka`, TTL from config).
//! Stock is never cached: the store asks for a fresh snapshot before every
//! quantity increase.
//!
//! # Endpoints
//!
//! - `GET {base}/products/{id}` - catalog record
//! - `GET {base}/stock/{id}` - `{ id, amount }`

mod client;
mod memory;

use std::future::Future;

use rocketshoes_core::{CatalogProduct, ProductId, StockEntry};
use thiserror::Error;

pub use client::CatalogClient;
pub use memory::InMemoryCatalog;

/// Errors that can occur when querying the catalog or stock service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response or build a request URL.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read access to product details and stock levels.
pub trait Catalog: Send + Sync {
    /// Fetch the catalog record for a product.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<CatalogProduct, CatalogError>> + Send;

    /// Fetch the current stock snapshot for a product.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<StockEntry, CatalogError>> + Send;
}
