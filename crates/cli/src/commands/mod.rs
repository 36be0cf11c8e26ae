//! CLI command implementations.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use agrimart_core::CatalogError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog file is not a valid product list.
    #[error("Invalid catalog {}: {source}", path.display())]
    CatalogParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Catalog file parsed but breaks a product invariant.
    #[error("Invalid catalog {}: {source}", path.display())]
    CatalogInvalid {
        path: PathBuf,
        source: CatalogError,
    },

    /// Product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Product does not come in the requested size.
    #[error("{product} is not available in size {size}")]
    UnknownSize { product: String, size: String },

    /// The cart changed in memory but the snapshot could not be written.
    #[error("Cart was not saved; see the error above")]
    NotSaved,
}
