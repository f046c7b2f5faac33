//! Internal cart errors.
//!
//! `CartError` is what a cart operation fails with internally. It never
//! leaves the store: at the operation boundary it is logged and converted
//! into a [`Notice`] via [`CartError::notice`].

use rocketshoes_core::{LineItemError, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notice::{Notice, Operation};
use crate::storage::StorageError;

/// Reasons a cart operation is rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Quantities are set absolutely and must be at least 1.
    #[error("Invalid amount 0 for product {0}; use removal instead")]
    ZeroAmount(ProductId),

    /// Not enough units available.
    #[error("Product {id}: requested {requested}, {available} in stock")]
    OutOfStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Catalog or stock lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The next cart would break an invariant.
    #[error("Cart error: {0}")]
    LineItem(#[from] LineItemError),
}

impl CartError {
    /// Notice shown to the shopper when `operation` fails with this error.
    #[must_use]
    pub const fn notice(&self, operation: Operation) -> Notice {
        match self {
            Self::OutOfStock { .. } => Notice::OutOfStock,
            _ => operation.failure_notice(),
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            id: ProductId::new(4),
            requested: 3,
            available: 2,
        };
        assert_eq!(err.to_string(), "Product 4: requested 3, 2 in stock");

        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.to_string(), "Product 9 is not in the cart");
    }

    #[test]
    fn test_notice_mapping() {
        let out_of_stock = CartError::OutOfStock {
            id: ProductId::new(1),
            requested: 1,
            available: 0,
        };
        assert_eq!(out_of_stock.notice(Operation::Add), Notice::OutOfStock);
        assert_eq!(
            out_of_stock.notice(Operation::UpdateAmount),
            Notice::OutOfStock
        );

        let missing = CartError::NotInCart(ProductId::new(1));
        assert_eq!(missing.notice(Operation::Remove), Notice::RemovalFailed);
        assert_eq!(
            missing.notice(Operation::UpdateAmount),
            Notice::QuantityUpdateFailed
        );

        let offline = CartError::Catalog(CatalogError::NotFound("products/1".to_string()));
        assert_eq!(offline.notice(Operation::Add), Notice::AdditionFailed);
    }
}
