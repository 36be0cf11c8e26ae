//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! agrimart cart add 1 5kg
//! agrimart cart update 1 5kg 3
//! agrimart cart remove 1 5kg
//! agrimart cart show
//! agrimart cart clear
//! ```
//!
//! The cart is kept in `<store>/cart.json`, the same snapshot format the
//! storefront keeps in its sessions.
//!
//! # Environment Variables
//!
//! - `AGRIMART_CART_DIR` - Directory holding the cart snapshot (default `.agrimart`)

use agrimart_core::{CartStore, Catalog, KeyValueStore, Price, ProductId};

use super::CommandError;

/// Log the cart lines and totals.
pub fn show<S: KeyValueStore>(cart: &CartStore<S>) {
    if cart.cart_items().is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for line in cart.cart_items() {
        tracing::info!(
            "{:<24} {:<16} {:>3} x {:>10} = {:>10}",
            line.product.name,
            line.size,
            line.quantity,
            Price::store(line.unit_price()).display(),
            Price::store(line.line_total()).display()
        );
    }
    tracing::info!(
        "Items: {}  Total: {}",
        cart.total_items(),
        Price::store(cart.total_price()).display()
    );
}

/// Fail when the last mutation did not reach the store directory.
fn ensure_saved<S: KeyValueStore>(cart: &CartStore<S>) -> Result<(), CommandError> {
    if cart.is_persisted() {
        Ok(())
    } else {
        Err(CommandError::NotSaved)
    }
}

/// Add one unit of a catalog product size.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog, does not come
/// in `size`, or the cart could not be written.
pub fn add<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    catalog: &Catalog,
    product_id: &str,
    size: &str,
) -> Result<(), CommandError> {
    let product = catalog
        .get(&ProductId::new(product_id))
        .ok_or_else(|| CommandError::UnknownProduct(product_id.to_owned()))?;
    if !product.has_size(size) {
        return Err(CommandError::UnknownSize {
            product: product.name.clone(),
            size: size.to_owned(),
        });
    }

    cart.add_to_cart(product, size);
    ensure_saved(cart)?;
    tracing::info!(product = %product.name, size, "Added to cart");
    show(cart);
    Ok(())
}

/// Set the quantity of a cart line. Quantities below 1 leave the cart as it is.
///
/// # Errors
///
/// Returns an error if the cart could not be written.
pub fn update<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product_id: &str,
    size: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    if quantity < 1 {
        tracing::warn!(quantity, "Quantity must be at least 1; cart unchanged");
    }
    cart.update_quantity(&ProductId::new(product_id), size, quantity);
    ensure_saved(cart)?;
    show(cart);
    Ok(())
}

/// Remove a cart line.
///
/// # Errors
///
/// Returns an error if the cart could not be written.
pub fn remove<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product_id: &str,
    size: &str,
) -> Result<(), CommandError> {
    cart.remove_from_cart(&ProductId::new(product_id), size);
    ensure_saved(cart)?;
    show(cart);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart could not be written.
pub fn clear<S: KeyValueStore>(cart: &mut CartStore<S>) -> Result<(), CommandError> {
    cart.clear_cart();
    ensure_saved(cart)?;
    tracing::info!("Cart cleared");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agrimart_core::FileStore;
    use rust_decimal::Decimal;

    #[test]
    fn test_add_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::seed();

        let mut cart = CartStore::hydrate(FileStore::new(dir.path()));
        add(&mut cart, &catalog, "1", "5kg").unwrap();
        add(&mut cart, &catalog, "1", "5kg").unwrap();

        let cart = CartStore::hydrate(FileStore::new(dir.path()));
        assert_eq!(cart.cart_items().len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::from(2598));
    }

    #[test]
    fn test_add_rejects_unknown_product_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::seed();
        let mut cart = CartStore::hydrate(FileStore::new(dir.path()));

        let err = add(&mut cart, &catalog, "99", "5kg").unwrap_err();
        assert!(matches!(err, CommandError::UnknownProduct(id) if id == "99"));

        let err = add(&mut cart, &catalog, "3", "5kg").unwrap_err();
        assert!(matches!(err, CommandError::UnknownSize { .. }));
        assert!(cart.cart_items().is_empty());
    }

    #[test]
    fn test_update_remove_clear() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::seed();
        let mut cart = CartStore::hydrate(FileStore::new(dir.path()));
        add(&mut cart, &catalog, "1", "1kg").unwrap();
        add(&mut cart, &catalog, "2", "5kg").unwrap();

        update(&mut cart, "1", "1kg", 4).unwrap();
        assert_eq!(cart.total_items(), 5);

        update(&mut cart, "1", "1kg", 0).unwrap();
        assert_eq!(cart.total_items(), 5);

        remove(&mut cart, "2", "5kg").unwrap();
        assert_eq!(cart.cart_items().len(), 1);

        clear(&mut cart).unwrap();
        let cart = CartStore::hydrate(FileStore::new(dir.path()));
        assert!(cart.cart_items().is_empty());
    }

    #[test]
    fn test_unwritable_store_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();
        let catalog = Catalog::seed();

        let mut cart = CartStore::hydrate(FileStore::new(&blocked));
        let err = add(&mut cart, &catalog, "1", "5kg").unwrap_err();
        assert!(matches!(err, CommandError::NotSaved));
        assert!(matches!(clear(&mut cart), Err(CommandError::NotSaved)));
    }
}
