//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types shared by the RocketShoes components:
//! - `storefront` - Cart store, catalog client and storage slots
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure transformations - no I/O, no
//! HTTP clients, no storage. Every cart mutation here returns a new [`Cart`]
//! so callers can persist it before committing.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog records, stock snapshots and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
