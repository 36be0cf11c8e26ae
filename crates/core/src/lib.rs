//! Agrimart Core - Shared types library.
//!
//! This crate provides the pieces shared by all Agrimart components:
//! - `storefront` - Public-facing storefront (products, cart, dealer applications)
//! - `cli` - Command-line cart and catalog tools
//!
//! # Architecture
//!
//! The core crate performs no network I/O. The only I/O it knows about is the
//! key-value storage behind the cart, and that sits behind the
//! [`storage::KeyValueStore`] trait so callers decide where snapshots live.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and statuses
//! - [`catalog`] - Products, sizes and the seed catalog
//! - [`cart`] - The cart store, its snapshot type and persistence codec
//! - [`storage`] - Key-value storage backends for cart snapshots
//! - [`dealer`] - Dealer application submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod dealer;
pub mod storage;
pub mod types;

pub use cart::{CartLine, CartState, CartStore};
pub use catalog::{Catalog, CatalogError, Category, Product, ProductSize};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::*;
