//! Shopping cart state and store.
//!
//! A cart is an ordered list of [`CartLine`]s keyed by `(product id, size)`.
//! No two lines share a key. [`CartStore`] owns the current [`CartState`],
//! applies the four mutations, and writes a snapshot to its
//! [`KeyValueStore`] after each one.
//!
//! # Policy
//!
//! Every operation is total. Out-of-range quantities and unknown keys are
//! no-ops, an unknown size prices at zero, and storage failures are logged
//! rather than returned. Callers that want stricter input checking do it
//! before calling the store.
//!
//! # Example
//!
//! ```
//! use agrimart_core::{Catalog, CartStore, MemoryStore, ProductId};
//!
//! let catalog = Catalog::seed();
//! let seeds = catalog.get(&ProductId::new("1")).unwrap();
//!
//! let mut cart = CartStore::hydrate(MemoryStore::new());
//! cart.add_to_cart(seeds, "5kg");
//! cart.add_to_cart(seeds, "5kg");
//!
//! assert_eq!(cart.cart_items().len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! ```

pub mod codec;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::storage::KeyValueStore;
use crate::types::ProductId;

pub use codec::{CodecError, STORAGE_KEY};

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product as it was when first added.
    pub product: Product,
    /// Chosen size label.
    pub size: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Whether this line has the given key.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product.id == product_id && self.size == size
    }

    /// Unit price from the line's own size table; zero if the size is unknown.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.price_of(&self.size)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// An immutable cart snapshot.
///
/// Transitions return a new snapshot; the old one is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line with the given key.
    #[must_use]
    pub fn line(&self, product_id: &ProductId, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(product_id, size))
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of all line totals, each priced from its own product snapshot.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Snapshot with one more unit of `(product, size)`.
    ///
    /// Merges into the existing line when the key is present, otherwise
    /// appends a new line with quantity 1.
    #[must_use]
    pub fn with_added(&self, product: &Product, size: &str) -> Self {
        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|l| l.matches(&product.id, size)) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(CartLine {
                product: product.clone(),
                size: size.to_owned(),
                quantity: 1,
            }),
        }
        Self { lines }
    }

    /// Snapshot without the line for `(product_id, size)`.
    #[must_use]
    pub fn without(&self, product_id: &ProductId, size: &str) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|l| !l.matches(product_id, size))
                .cloned()
                .collect(),
        }
    }

    /// Snapshot with the line for `(product_id, size)` set to `quantity`.
    ///
    /// Quantities below 1 or above `u32::MAX` leave the snapshot unchanged.
    #[must_use]
    pub fn with_quantity(&self, product_id: &ProductId, size: &str, quantity: i64) -> Self {
        let Some(quantity) = u32::try_from(quantity).ok().filter(|q| *q >= 1) else {
            return self.clone();
        };
        Self {
            lines: self
                .lines
                .iter()
                .map(|l| {
                    if l.matches(product_id, size) {
                        CartLine {
                            quantity,
                            ..l.clone()
                        }
                    } else {
                        l.clone()
                    }
                })
                .collect(),
        }
    }
}

/// The cart store.
///
/// Owns the authoritative [`CartState`] and the storage it persists to. The
/// store is constructed explicitly and handed to whoever needs it; all
/// mutation goes through `&mut self`, so readers always see a whole snapshot.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
    /// Whether the last mutation reached storage.
    persisted: bool,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store and load the persisted snapshot from `storage`.
    ///
    /// A missing snapshot yields an empty cart. A snapshot that cannot be
    /// decoded, or a storage read failure, also yields an empty cart and is
    /// logged; construction never fails.
    pub fn hydrate(storage: S) -> Self {
        let state = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => codec::decode(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable cart snapshot");
                CartState::default()
            }),
            Ok(None) => CartState::default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cart snapshot");
                CartState::default()
            }
        };

        tracing::debug!(lines = state.len(), "Cart hydrated");
        Self {
            state,
            storage,
            persisted: true,
        }
    }

    /// Add one unit of `size` of `product`.
    ///
    /// The size is not checked against `product.sizes`.
    pub fn add_to_cart(&mut self, product: &Product, size: &str) {
        let next = self.state.with_added(product, size);
        self.commit(next);
    }

    /// Remove the line for `(product_id, size)`, if present.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, size: &str) {
        let next = self.state.without(product_id, size);
        self.commit(next);
    }

    /// Set the quantity of the line for `(product_id, size)`.
    ///
    /// `quantity < 1` is ignored; use [`remove_from_cart`](Self::remove_from_cart)
    /// to drop a line.
    pub fn update_quantity(&mut self, product_id: &ProductId, size: &str, quantity: i64) {
        if quantity < 1 {
            return;
        }
        let next = self.state.with_quantity(product_id, size, quantity);
        self.commit(next);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.commit(CartState::default());
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.state.total_price()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.clone()
    }

    /// Current state by reference.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether the snapshot from the last mutation was written to storage.
    ///
    /// True for a freshly hydrated store. A failed write is logged and turns
    /// this false until a later mutation writes successfully.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Replace the state and persist it.
    fn commit(&mut self, next: CartState) {
        self.state = next;
        self.persisted = self.persist();
    }

    fn persist(&self) -> bool {
        let raw = match codec::encode(&self.state) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode cart snapshot");
                return false;
            }
        };
        match self.storage.set(STORAGE_KEY, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist cart snapshot");
                false
            }
        }
    }
}
