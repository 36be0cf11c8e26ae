//! In-memory cart registry.
//!
//! Every visitor cart lives here under a [`CartId`]; the session only
//! carries the id. A request opens its cart for as long as it runs, so
//! two requests on the same session apply their operations one after the
//! other and neither starts from a snapshot the other is about to replace.
//!
//! Carts idle for longer than the session lifetime are dropped the next
//! time a cart is created.

mod error;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use agrimart_core::MemoryStore;
use serde::{Deserialize, Serialize};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

pub use error::CartRegistryError;

/// Identifier of a server-side cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(Uuid);

impl CartId {
    /// Generate a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct CartEntry {
    cart: Arc<tokio::sync::Mutex<MemoryStore>>,
    touched: Instant,
}

/// Shared registry of visitor carts.
///
/// Cheaply cloneable; clones share the same carts.
#[derive(Debug, Clone)]
pub struct CartRegistry {
    carts: Arc<Mutex<HashMap<CartId, CartEntry>>>,
    idle_ttl: Duration,
}

/// A cart held exclusively by one request.
///
/// Other requests opening the same cart wait until this is dropped.
#[derive(Debug)]
pub struct OpenCart {
    id: CartId,
    guard: OwnedMutexGuard<MemoryStore>,
}

impl OpenCart {
    /// Id of the open cart.
    #[must_use]
    pub const fn id(&self) -> CartId {
        self.id
    }

    /// Handle to the cart's snapshot storage.
    #[must_use]
    pub fn storage(&self) -> MemoryStore {
        (*self.guard).clone()
    }
}

impl CartRegistry {
    /// Create an empty registry that forgets carts idle for `idle_ttl`.
    #[must_use]
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            carts: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Number of carts held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts.lock().map_or(0, |carts| carts.len())
    }

    /// Whether no carts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open the cart with `id`, waiting for any request that has it open.
    ///
    /// An id the registry does not know (expired, or from before a restart)
    /// opens a new empty cart under that id.
    ///
    /// # Errors
    ///
    /// Returns [`CartRegistryError::Poisoned`] if the registry lock is poisoned.
    pub async fn open(&self, id: CartId) -> Result<OpenCart, CartRegistryError> {
        let cart = {
            let mut carts = self.carts.lock().map_err(|_| CartRegistryError::Poisoned)?;
            let entry = carts.entry(id).or_insert_with(|| {
                tracing::debug!(cart_id = %id, "Starting cart");
                CartEntry {
                    cart: Arc::default(),
                    touched: Instant::now(),
                }
            });
            entry.touched = Instant::now();
            Arc::clone(&entry.cart)
        };

        Ok(OpenCart {
            id,
            guard: cart.lock_owned().await,
        })
    }

    /// Create and open a new cart, dropping carts that have sat idle.
    ///
    /// # Errors
    ///
    /// Returns [`CartRegistryError::Poisoned`] if the registry lock is poisoned.
    pub async fn create(&self) -> Result<OpenCart, CartRegistryError> {
        self.prune()?;
        self.open(CartId::generate()).await
    }

    fn prune(&self) -> Result<(), CartRegistryError> {
        let mut carts = self.carts.lock().map_err(|_| CartRegistryError::Poisoned)?;
        let before = carts.len();
        let idle_ttl = self.idle_ttl;
        // A cart that is open right now has another Arc handle alive.
        carts.retain(|_, entry| {
            entry.touched.elapsed() < idle_ttl || Arc::strong_count(&entry.cart) > 1
        });
        let dropped = before - carts.len();
        drop(carts);

        if dropped > 0 {
            tracing::debug!(dropped, "Dropped idle carts");
        }
        Ok(())
    }
}
