//! Core types for RocketShoes.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod stock;

pub use cart::{Cart, LineItemError};
pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::{CatalogProduct, Product};
pub use stock::StockEntry;
