//! Display data for a cart.
//!
//! Turns a [`Cart`] into pre-formatted strings so presentation code never
//! does price arithmetic.

use rocketshoes_core::{Cart, CurrencyCode, Price, Product};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub amount: u32,
    pub price: String,
    pub subtotal: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Number of distinct products (the header badge).
    pub product_count: usize,
    /// Units across all lines.
    pub item_count: u32,
    pub total: String,
}

impl CartView {
    /// Build the view for a cart priced in `currency`.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            product_count: cart.len(),
            item_count: cart.item_count(),
            total: Price::new(cart.total(), currency).display(),
        }
    }
}

impl CartItemView {
    fn new(item: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            amount: item.amount,
            price: Price::new(item.price, currency).display(),
            subtotal: Price::new(item.subtotal(), currency).display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self::new(cart, CurrencyCode::default())
    }
}
