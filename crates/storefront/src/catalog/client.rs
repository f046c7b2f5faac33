//! REST client for the catalog and stock service.
//!
//! Uses `reqwest` for HTTP. Caches product details using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use rocketshoes_core::{CatalogProduct, ProductId, StockEntry};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;

/// Client for the catalog and stock REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<ProductId, CatalogProduct>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: with_trailing_slash(config.api_url.clone()),
                products,
            }),
        })
    }

    /// Get a product's catalog record.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: CatalogProduct = self.get_json(&format!("products/{id}")).await?;

        self.inner.products.insert(id, product.clone()).await;

        Ok(product)
    }

    /// Get a product's current stock. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has no stock record or the API request fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn get_stock(&self, id: ProductId) -> Result<StockEntry, CatalogError> {
        self.get_json(&format!("stock/{id}")).await
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| CatalogError::Parse(format!("Invalid request path {path}: {e}")))?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %message.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl Catalog for CatalogClient {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.get_product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockEntry, CatalogError> {
        self.get_stock(id).await
    }
}

/// `Url::join` replaces the last segment unless the base ends with a slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use super::*;

    fn client_for(server: &mockito::Server) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            api_url: Url::parse(&server.url()).unwrap(),
            http_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(60),
        })
        .unwrap()
    }

    #[test]
    fn test_with_trailing_slash() {
        let url = with_trailing_slash(Url::parse("http://api.test/v1").unwrap());
        assert_eq!(url.join("stock/1").unwrap().as_str(), "http://api.test/v1/stock/1");

        let url = with_trailing_slash(Url::parse("http://api.test").unwrap());
        assert_eq!(url.join("stock/1").unwrap().as_str(), "http://api.test/stock/1");
    }

    #[tokio::test]
    async fn test_get_product_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"https://cdn/1.jpg"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let first = client.get_product(ProductId::new(1)).await.unwrap();
        let second = client.get_product(ProductId::new(1)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.price, Decimal::new(1799, 1));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_stock_is_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/stock/2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":2,"amount":5}"#)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let stock = client.get_stock(ProductId::new(2)).await.unwrap();
            assert_eq!(stock.amount, 5);
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products/99")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_product(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_and_bad_body() {
        let mut server = mockito::Server::new_async().await;
        let _error = server
            .mock("GET", "/stock/3")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let _garbage = server
            .mock("GET", "/stock/4")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_stock(ProductId::new(3)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Api { status: 500, ref message } if message == "boom"));

        let err = client.get_stock(ProductId::new(4)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
