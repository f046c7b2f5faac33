//! In-memory catalog for local development and tests.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rocketshoes_core::{CatalogProduct, ProductId, StockEntry};

use super::{Catalog, CatalogError};

/// Catalog backed by in-process maps.
///
/// Clones share the same data, so a test can keep a handle and change stock
/// levels while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<CatalogData>>,
}

#[derive(Debug, Default)]
struct CatalogData {
    products: HashMap<ProductId, CatalogProduct>,
    stock: HashMap<ProductId, u32>,
    offline: bool,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a product with the given stock level.
    #[must_use]
    pub fn with_product(self, product: CatalogProduct, stock: u32) -> Self {
        self.insert(product, stock);
        self
    }

    /// Add (or replace) a product with the given stock level.
    pub fn insert(&self, product: CatalogProduct, stock: u32) {
        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.stock.insert(product.id, stock);
        data.products.insert(product.id, product);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .stock
            .insert(id, amount);
    }

    /// Make every lookup fail as if the service were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .offline = offline;
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&CatalogData) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if data.offline {
            return Err(CatalogError::Api {
                status: 503,
                message: "catalog offline".to_string(),
            });
        }
        f(&data)
    }
}

impl Catalog for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.read(|data| {
            data.products
                .get(&id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(format!("products/{id}")))
        })
    }

    async fn stock(&self, id: ProductId) -> Result<StockEntry, CatalogError> {
        self.read(|data| {
            data.stock
                .get(&id)
                .map(|&amount| StockEntry { id, amount })
                .ok_or_else(|| CatalogError::NotFound(format!("stock/{id}")))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sneaker(id: i32) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            title: format!("Sneaker {id}"),
            price: Decimal::new(9990, 2),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_lookup_and_stock_changes() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 2);
        let handle = catalog.clone();

        assert_eq!(catalog.product(ProductId::new(1)).await.unwrap().id, ProductId::new(1));
        assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 2);

        handle.set_stock(ProductId::new(1), 0);
        assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 0);
    }

    #[tokio::test]
    async fn test_missing_and_offline() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 2);

        assert!(matches!(
            catalog.product(ProductId::new(2)).await,
            Err(CatalogError::NotFound(_))
        ));

        catalog.set_offline(true);
        assert!(matches!(
            catalog.stock(ProductId::new(1)).await,
            Err(CatalogError::Api { status: 503, .. })
        ));
    }
}
