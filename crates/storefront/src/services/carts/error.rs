//! Cart registry error types.

use thiserror::Error;

/// Errors that can occur while opening carts.
#[derive(Debug, Error)]
pub enum CartRegistryError {
    /// A task panicked while holding the registry lock.
    #[error("cart registry lock poisoned")]
    Poisoned,
}
