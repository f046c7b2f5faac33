//! The shopper's cart.
//!
//! A [`Cart`] is an ordered list of line-items, unique by product ID, where
//! every line holds at least one unit at a non-negative price and the total
//! fits a `Decimal`. The invariants are checked on construction and on
//! deserialization, so a `Cart` value is always valid.
//!
//! Transformations (`with_added`, `with_amount`, `without`) never mutate in
//! place; they return the next cart so it can be persisted before it
//! replaces the current one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::{CatalogProduct, Product};

/// Errors raised when a cart transformation would break an invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineItemError {
    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// The product is already in the cart.
    #[error("product {0} is already in the cart")]
    Duplicate(ProductId),

    /// A line-item would hold zero units.
    #[error("product {0} cannot be held with amount 0")]
    ZeroAmount(ProductId),

    /// The product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// The line or the cart total would exceed the representable range.
    #[error("cart total overflows with product {0}")]
    TotalOverflow(ProductId),
}

/// Ordered collection of line-items, unique by product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line-items, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::Duplicate`] if two lines share an ID,
    /// [`LineItemError::ZeroAmount`] if a line holds no units,
    /// [`LineItemError::NegativePrice`] for a price below zero and
    /// [`LineItemError::TotalOverflow`] if the total cannot be represented.
    pub fn from_items(items: Vec<Product>) -> Result<Self, LineItemError> {
        let mut total = Decimal::ZERO;
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(LineItemError::ZeroAmount(item.id));
            }
            if items.iter().take(index).any(|earlier| earlier.id == item.id) {
                return Err(LineItemError::Duplicate(item.id));
            }
            if item.price < Decimal::ZERO {
                return Err(LineItemError::NegativePrice(item.id));
            }
            total = item
                .checked_subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(LineItemError::TotalOverflow(item.id))?;
        }
        Ok(Self { items })
    }

    /// Line-items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Iterate over the line-items.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Find the line-item for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.amount))
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()))
    }

    /// Return a cart with `product` appended as a single unit.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::Duplicate`] if the product is already present,
    /// or the price errors of [`from_items`](Self::from_items).
    pub fn with_added(&self, product: CatalogProduct) -> Result<Self, LineItemError> {
        if self.contains(product.id) {
            return Err(LineItemError::Duplicate(product.id));
        }
        let mut items = self.items.clone();
        items.push(product.into_line_item(1));
        Self::from_items(items)
    }

    /// Return a cart with the product's amount set to `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::ZeroAmount`] for `amount == 0`,
    /// [`LineItemError::NotFound`] if the product is absent and
    /// [`LineItemError::TotalOverflow`] if the new total cannot be represented.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Result<Self, LineItemError> {
        if amount == 0 {
            return Err(LineItemError::ZeroAmount(id));
        }
        if !self.contains(id) {
            return Err(LineItemError::NotFound(id));
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    Product {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self::from_items(items)
    }

    /// Return a cart without the product.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::NotFound`] if the product is absent.
    pub fn without(&self, id: ProductId) -> Result<Self, LineItemError> {
        if !self.contains(id) {
            return Err(LineItemError::NotFound(id));
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Ok(Self { items })
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = LineItemError;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
