//! RocketShoes Storefront - shopper cart library.
//!
//! Tracks the products a shopper selected and their quantities, validates
//! quantities against the stock service and persists the cart in a durable
//! storage slot.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart and performs add / remove / update
//! - [`catalog`] fetches product details and stock (`reqwest`, cached with `moka`)
//! - [`storage`] holds the JSON-serialized cart between runs
//! - [`notice`] turns rejected operations into shopper-facing messages
//! - [`context::CartContext`] shares one store between consumers
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::{CartConfig, CartContext, CartStore, CatalogClient, FileStorage, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::load(
//!     CatalogClient::new(&config.catalog)?,
//!     FileStorage::new(&config.storage.dir),
//!     TracingNotifier,
//!     config.storage.cart_key.clone(),
//! );
//! let cart = CartContext::new(store);
//!
//! cart.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod notice;
pub mod storage;
pub mod store;
pub mod view;

pub use catalog::{Catalog, CatalogClient, CatalogError, InMemoryCatalog};
pub use config::{CartConfig, ConfigError};
pub use context::CartContext;
pub use error::CartError;
pub use notice::{Notice, NoticeLog, Notifier, Operation, TracingNotifier};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{CartOutcome, CartStore, UpdateProductAmount};
pub use view::{CartItemView, CartView};
