//! Shared cart context handed to consumers.
//!
//! A [`CartContext`] is the explicit handle UI code receives instead of
//! reaching for global state. Clones share one [`CartStore`]; operations are
//! serialized by an async mutex so each runs to completion (lookups
//! included) before the next begins.

use std::sync::Arc;

use rocketshoes_core::{Cart, ProductId};
use tokio::sync::{Mutex, watch};

use crate::catalog::Catalog;
use crate::notice::{Notifier, TracingNotifier};
use crate::storage::Storage;
use crate::store::{CartOutcome, CartStore, UpdateProductAmount};

/// Cheaply cloneable access to one cart store.
pub struct CartContext<C, S, N = TracingNotifier> {
    store: Arc<Mutex<CartStore<C, S, N>>>,
    changes: watch::Receiver<Cart>,
}

impl<C, S, N> Clone for CartContext<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            changes: self.changes.clone(),
        }
    }
}

impl<C, S, N> CartContext<C, S, N>
where
    C: Catalog,
    S: Storage,
    N: Notifier,
{
    /// Wrap a loaded store.
    #[must_use]
    pub fn new(store: CartStore<C, S, N>) -> Self {
        let changes = store.subscribe();
        Self {
            store: Arc::new(Mutex::new(store)),
            changes,
        }
    }

    /// Snapshot of the last committed cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.changes.borrow().clone()
    }

    /// Receive the cart after every committed mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.changes.clone()
    }

    /// See [`CartStore::add_product`].
    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        self.store.lock().await.add_product(product_id).await
    }

    /// See [`CartStore::remove_product`].
    pub async fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        self.store.lock().await.remove_product(product_id)
    }

    /// See [`CartStore::update_product_amount`].
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> CartOutcome {
        self.store.lock().await.update_product_amount(update).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::CatalogProduct;
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::notice::{Notice, NoticeLog};
    use crate::storage::MemoryStorage;

    fn context(stock: u32) -> CartContext<InMemoryCatalog, MemoryStorage, NoticeLog> {
        let catalog = InMemoryCatalog::new().with_product(
            CatalogProduct {
                id: ProductId::new(1),
                title: "Tênis de Caminhada Leve Confortável".to_string(),
                price: Decimal::new(17_990, 2),
                image_url: String::new(),
            },
            stock,
        );
        CartContext::new(CartStore::load(
            catalog,
            MemoryStorage::new(),
            NoticeLog::new(),
            "cart",
        ))
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let ctx = context(5);
        let other = ctx.clone();

        let _ = ctx.add_product(ProductId::new(1)).await;
        let _ = other.add_product(ProductId::new(1)).await;

        assert_eq!(ctx.cart().get(ProductId::new(1)).unwrap().amount, 2);
        assert_eq!(other.cart(), ctx.cart());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let ctx = context(3);

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let ctx = ctx.clone();
                tokio::spawn(async move { ctx.add_product(ProductId::new(1)).await })
            })
            .collect();

        let mut rejected = 0;
        for task in tasks {
            if task.await.unwrap() == CartOutcome::Rejected(Notice::OutOfStock) {
                rejected += 1;
            }
        }

        assert_eq!(rejected, 2);
        assert_eq!(ctx.cart().get(ProductId::new(1)).unwrap().amount, 3);
    }

    #[tokio::test]
    async fn test_update_and_remove_through_context() {
        let ctx = context(4);
        let mut changes = ctx.subscribe();

        let _ = ctx.add_product(ProductId::new(1)).await;
        let updated = ctx
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 4,
            })
            .await;
        assert!(updated.is_updated());
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow_and_update().item_count(), 4);

        assert!(ctx.remove_product(ProductId::new(1)).await.is_updated());
        assert!(ctx.cart().is_empty());
    }
}
