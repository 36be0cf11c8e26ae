//! Business logic services for storefront.
//!
//! # Services
//!
//! - `carts` - Server-side visitor carts, one request at a time per cart
//! - `dealers` - Dealer application registry

pub mod carts;
pub mod dealers;

pub use carts::{CartId, CartRegistry, CartRegistryError, OpenCart};
pub use dealers::{DealerRegistry, DealerRegistryError};
