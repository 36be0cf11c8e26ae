//! Home page route handler.

use axum::response::Redirect;

/// The storefront opens on the product listing.
pub async fn home() -> Redirect {
    Redirect::to("/products")
}
