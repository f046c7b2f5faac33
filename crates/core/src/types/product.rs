//! Catalog records and cart line-items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as returned by the catalog service.
///
/// The catalog does not know about quantities; see [`Product`] for the
/// cart line-item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    #[serde(alias = "image")]
    pub image_url: String,
}

impl CatalogProduct {
    /// Turn the catalog record into a line-item holding `amount` units.
    #[must_use]
    pub fn into_line_item(self, amount: u32) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            image_url: self.image_url,
            amount,
        }
    }
}

/// A line-item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier, unique within a cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    #[serde(alias = "image")]
    pub image_url: String,
    /// Quantity held in the cart. Always at least 1 inside a [`super::Cart`].
    pub amount: u32,
}

impl Product {
    /// Price of the whole line (`price * amount`), saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.amount))
    }

    /// Price of the whole line, or `None` if it does not fit a `Decimal`.
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.amount))
    }
}
