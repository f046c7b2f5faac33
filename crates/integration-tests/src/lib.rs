//! Integration tests for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart operations over the in-memory catalog and storage
//! - `http_catalog` - Cart operations against a mocked products / stock service,
//!   including a cart surviving a restart in the file slot
