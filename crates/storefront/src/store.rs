//! The cart store.
//!
//! `CartStore` owns the shopper's [`Cart`] and is the only thing that
//! mutates it. Each operation follows the same sequence:
//!
//! 1. validate against the current cart
//! 2. query the catalog / stock service if needed
//! 3. build the next cart
//! 4. persist it to the storage slot
//! 5. commit it in memory and publish it to subscribers
//!
//! A failure at any step leaves the cart unchanged, logs the cause and
//! raises a [`Notice`]. Mutating operations take `&mut self`, so an
//! operation (including its lookups) always completes before the next one
//! starts.

use rocketshoes_core::{Cart, CatalogProduct, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::error::{CartError, Result};
use crate::notice::{Notice, Notifier, Operation, TracingNotifier};
use crate::storage::{Storage, read_json, write_json};

/// Absolute quantity change for a line-item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

/// Result of a cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CartOutcome {
    /// The cart changed and was persisted.
    Updated,
    /// The cart is unchanged; the notice was delivered to the notifier.
    Rejected(Notice),
}

impl CartOutcome {
    /// Whether the operation changed the cart.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Notice raised by a rejected operation.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::Updated => None,
            Self::Rejected(notice) => Some(*notice),
        }
    }
}

/// Shopper cart with stock validation and durable persistence.
pub struct CartStore<C, S, N = TracingNotifier> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    cart: Cart,
    changes: watch::Sender<Cart>,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: Catalog,
    S: Storage,
    N: Notifier,
{
    /// Open the store, restoring the cart from the `key` slot.
    ///
    /// An absent slot yields an empty cart. A slot that cannot be read or
    /// does not hold a valid cart is logged and ignored; it is overwritten by
    /// the next successful mutation.
    #[instrument(skip_all)]
    pub fn load(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match read_json::<Cart>(&storage, &key) {
            Ok(Some(cart)) => {
                info!(key = %key, products = cart.len(), units = cart.item_count(), "Restored cart");
                cart
            }
            Ok(None) => {
                debug!(key = %key, "No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable stored cart");
                Cart::new()
            }
        };

        let (changes, _) = watch::channel(cart.clone());

        Self {
            catalog,
            storage,
            notifier,
            key,
            cart,
            changes,
        }
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receive the cart after every committed mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.changes.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through
    /// [`update_product_amount`](Self::update_product_amount) with its amount
    /// plus one, so its stock check and notices apply. A new product is
    /// appended with amount 1 unless it is out of stock.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> CartOutcome {
        let product = match self.fetch_product(product_id).await {
            Ok(product) => product,
            Err(e) => return self.settle(Operation::Add, Err(e)),
        };

        if let Some(current) = self.cart.get(product_id).map(|item| item.amount) {
            return self
                .update_product_amount(UpdateProductAmount {
                    product_id,
                    amount: current.saturating_add(1),
                })
                .await;
        }

        let result = self.append(product).await;
        self.settle(Operation::Add, result)
    }

    /// Remove a product from the cart.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) -> CartOutcome {
        let result = self.remove(product_id);
        self.settle(Operation::Remove, result)
    }

    /// Set a product's amount, checking it against current stock.
    ///
    /// Amounts are absolute; 0 is rejected (removal is
    /// [`remove_product`](Self::remove_product)'s job).
    #[instrument(skip(self, update), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&mut self, update: UpdateProductAmount) -> CartOutcome {
        let result = self.set_amount(update).await;
        self.settle(Operation::UpdateAmount, result)
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<CatalogProduct> {
        let product = self.catalog.product(product_id).await?;
        if product.id != product_id {
            return Err(CatalogError::Parse(format!(
                "requested product {product_id}, catalog returned {}",
                product.id
            ))
            .into());
        }
        Ok(product)
    }

    async fn append(&mut self, product: CatalogProduct) -> Result<()> {
        let stock = self.catalog.stock(product.id).await?;
        if !stock.is_available() {
            return Err(CartError::OutOfStock {
                id: product.id,
                requested: 1,
                available: stock.amount,
            });
        }

        let next = self.cart.with_added(product)?;
        self.commit(next)
    }

    fn remove(&mut self, product_id: ProductId) -> Result<()> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }
        let next = self.cart.without(product_id)?;
        self.commit(next)
    }

    async fn set_amount(&mut self, update: UpdateProductAmount) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = update;

        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }
        if amount == 0 {
            return Err(CartError::ZeroAmount(product_id));
        }

        let stock = self.catalog.stock(product_id).await?;
        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                id: product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let next = self.cart.with_amount(product_id, amount)?;
        self.commit(next)
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&mut self, next: Cart) -> Result<()> {
        write_json(&self.storage, &self.key, &next)?;
        self.cart = next;
        self.changes.send_replace(self.cart.clone());
        debug!(products = self.cart.len(), units = self.cart.item_count(), "Cart committed");
        Ok(())
    }

    fn settle(&self, operation: Operation, result: Result<()>) -> CartOutcome {
        match result {
            Ok(()) => CartOutcome::Updated,
            Err(e) => {
                let notice = e.notice(operation);
                warn!(error = %e, operation = ?operation, notice = ?notice, "Cart operation rejected");
                self.notifier.notify(notice);
                CartOutcome::Rejected(notice)
            }
        }
    }
}
