//! Dealer registry error types.

use agrimart_core::Email;
use thiserror::Error;

/// Errors that can occur while recording dealer applications.
#[derive(Debug, Error)]
pub enum DealerRegistryError {
    /// An application for this email is still awaiting review.
    #[error("an application for {0} is already pending")]
    AlreadyPending(Email),

    /// A writer panicked while holding the registry lock.
    #[error("dealer registry lock poisoned")]
    Poisoned,
}
