//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart priced in reais
//! rs-cli cart show --currency BRL
//!
//! # Add one unit of product 1, then ask for three
//! rs-cli cart add 1
//! rs-cli cart set 1 3
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKETSHOES_API_URL` - Base URL of the products / stock service
//! - `ROCKETSHOES_STORAGE_DIR` - Directory holding the persisted cart

use rocketshoes_core::{CurrencyCode, ProductId};
use rocketshoes_storefront::{
    CartConfig, CartContext, CartOutcome, CartStore, CartView, CatalogClient, CatalogError,
    FileStorage, Notice, TracingNotifier, UpdateProductAmount,
};
use thiserror::Error;

/// Cart backed by the HTTP catalog and the on-disk slot.
pub type Cart = CartContext<CatalogClient, FileStorage, TracingNotifier>;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The HTTP client could not be built.
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    /// The store rejected the operation; the cart is unchanged.
    #[error("{0}")]
    Rejected(Notice),
}

/// Load the persisted cart.
///
/// # Errors
///
/// Returns an error if the catalog client cannot be created.
pub fn open(config: &CartConfig) -> Result<Cart, CartCommandError> {
    let catalog = CatalogClient::new(&config.catalog)?;
    let storage = FileStorage::new(&config.storage.dir);

    tracing::debug!(
        path = %storage.slot_path(&config.storage.cart_key).display(),
        "Opening cart"
    );

    let store = CartStore::load(
        catalog,
        storage,
        TracingNotifier,
        config.storage.cart_key.clone(),
    );
    Ok(CartContext::new(store))
}

/// Print every line with its subtotal and the cart total.
#[allow(clippy::print_stdout)]
pub fn show(cart: &Cart, currency: CurrencyCode) {
    let view = CartView::new(&cart.cart(), currency);

    if view.items.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in &view.items {
        println!(
            "{:>4}  {:<40} {:>4} x {:>10} = {:>10}",
            item.id, item.title, item.amount, item.price, item.subtotal
        );
    }
    println!(
        "{} products, {} items, total {} ({})",
        view.product_count,
        view.item_count,
        view.total,
        currency.code()
    );
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns [`CartCommandError::Rejected`] if the store refused the addition.
pub async fn add(cart: &Cart, product_id: ProductId) -> Result<(), CartCommandError> {
    accepted(cart.add_product(product_id).await)?;
    tracing::info!(%product_id, "Product added");
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns [`CartCommandError::Rejected`] if the product is not in the cart
/// or the slot could not be written.
pub async fn remove(cart: &Cart, product_id: ProductId) -> Result<(), CartCommandError> {
    accepted(cart.remove_product(product_id).await)?;
    tracing::info!(%product_id, "Product removed");
    Ok(())
}

/// Set the amount of a product already in the cart.
///
/// # Errors
///
/// Returns [`CartCommandError::Rejected`] if the amount is invalid, exceeds
/// stock, or the product is not in the cart.
pub async fn set(cart: &Cart, product_id: ProductId, amount: u32) -> Result<(), CartCommandError> {
    let update = UpdateProductAmount { product_id, amount };
    accepted(cart.update_product_amount(update).await)?;
    tracing::info!(%product_id, amount, "Product amount updated");
    Ok(())
}

fn accepted(outcome: CartOutcome) -> Result<(), CartCommandError> {
    match outcome {
        CartOutcome::Updated => Ok(()),
        CartOutcome::Rejected(notice) => Err(CartCommandError::Rejected(notice)),
    }
}
