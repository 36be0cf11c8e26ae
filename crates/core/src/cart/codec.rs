//! Snapshot encoding for persisted carts.
//!
//! A snapshot is the JSON array of cart lines, in cart order:
//!
//! ```json
//! [
//!   {
//!     "product": { "id": "1", "name": "Premium Seeds", "...": "...",
//!                  "sizes": [{ "size": "5kg", "price": "1299", "stock": 20 }] },
//!     "size": "5kg",
//!     "quantity": 2
//!   }
//! ]
//! ```
//!
//! There is no schema version. Anything that does not decode into a valid
//! [`CartState`] is rejected as a whole.

use std::collections::HashSet;

use super::CartState;

/// Storage key the cart snapshot lives under.
pub const STORAGE_KEY: &str = "cart";

/// Errors from encoding or decoding a cart snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The snapshot is not well-formed JSON of the expected shape.
    #[error("malformed cart snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot decoded but breaks a cart invariant.
    #[error("invalid cart snapshot: {0}")]
    Invalid(String),
}

/// Serialize a cart to its snapshot form.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode(state: &CartState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a snapshot back into a cart.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed input and
/// [`CodecError::Invalid`] when two lines share a `(product id, size)` key or
/// a line has a zero quantity.
pub fn decode(raw: &str) -> Result<CartState, CodecError> {
    let state: CartState = serde_json::from_str(raw)?;

    let mut keys = HashSet::with_capacity(state.len());
    for line in state.lines() {
        if line.quantity == 0 {
            return Err(CodecError::Invalid(format!(
                "line {} / {} has zero quantity",
                line.product.id, line.size
            )));
        }
        if !keys.insert((line.product.id.as_str(), line.size.as_str())) {
            return Err(CodecError::Invalid(format!(
                "duplicate line {} / {}",
                line.product.id, line.size
            )));
        }
    }

    Ok(state)
}
