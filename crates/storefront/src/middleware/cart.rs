//! Session-backed cart extractor.
//!
//! Carts live in the [`CartRegistry`](crate::services::CartRegistry); the
//! session holds only the cart id. [`SessionCart`] opens the visitor's cart
//! for the whole request, so concurrent requests on one session apply
//! their operations in turn. A visitor without a cart reads an empty one,
//! and a registry cart is created on the first mutation that writes a
//! snapshot.

use agrimart_core::cart::STORAGE_KEY;
use agrimart_core::{CartStore, KeyValueStore, MemoryStore};
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::services::{CartId, CartRegistry, OpenCart};
use crate::state::AppState;

/// Session key holding the visitor's [`CartId`].
pub const CART_ID_KEY: &str = "cart_id";

/// Per-request cart bound to the caller's session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: SessionCart) -> Result<Json<CartView>> {
///     cart.store_mut().clear_cart();
///     cart.save().await?;
///     Ok(Json(CartView::from(cart.store())))
/// }
/// ```
pub struct SessionCart {
    session: Session,
    carts: CartRegistry,
    /// Held until the request finishes; `None` until the visitor has a cart.
    open: Option<OpenCart>,
    store: CartStore<MemoryStore>,
}

impl SessionCart {
    /// Open the session's cart, waiting for any other request holding it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or the cart
    /// registry is poisoned.
    pub async fn load(session: Session, carts: CartRegistry) -> Result<Self, AppError> {
        let open = match session.get::<CartId>(CART_ID_KEY).await? {
            Some(id) => Some(carts.open(id).await?),
            None => None,
        };
        let storage = open.as_ref().map_or_else(MemoryStore::new, OpenCart::storage);

        Ok(Self {
            session,
            carts,
            open,
            store: CartStore::hydrate(storage),
        })
    }

    /// The hydrated cart store.
    #[must_use]
    pub const fn store(&self) -> &CartStore<MemoryStore> {
        &self.store
    }

    /// Mutable access for applying cart operations.
    pub const fn store_mut(&mut self) -> &mut CartStore<MemoryStore> {
        &mut self.store
    }

    /// Make the store's current snapshot the visitor's cart.
    ///
    /// A visitor with a registry cart already wrote through to it. For a
    /// visitor without one, a cart is created from the snapshot and its id
    /// stored in the session. Does nothing when no snapshot was ever
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written, the session
    /// store cannot be written, or the cart registry is poisoned.
    pub async fn save(&mut self) -> Result<(), AppError> {
        if !self.store.is_persisted() {
            return Err(AppError::Internal("cart snapshot was not written".to_string()));
        }
        if self.open.is_some() {
            return Ok(());
        }

        let snapshot = self
            .store
            .storage()
            .get(STORAGE_KEY)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let Some(raw) = snapshot else {
            return Ok(());
        };

        let open = self.carts.create().await?;
        open.storage()
            .set(STORAGE_KEY, &raw)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.session.insert(CART_ID_KEY, open.id()).await?;
        tracing::debug!(cart_id = %open.id(), "Cart attached to session");

        self.store = CartStore::hydrate(open.storage());
        self.open = Some(open);
        Ok(())
    }
}

impl FromRequestParts<AppState> for SessionCart {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        Self::load(session, state.carts().clone()).await
    }
}
