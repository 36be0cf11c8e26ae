//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Redirect to /products
//! GET  /health                   - Health check
//!
//! # Products
//! GET  /products                 - Product listing (?category=&page=)
//! GET  /products/:id             - Product detail
//!
//! # Cart (JSON unless noted)
//! GET  /cart                     - Cart page (HTML)
//! GET  /cart/items               - Cart contents and totals
//! POST /cart/add                 - Add one unit of a product size
//! POST /cart/update              - Set line quantity
//! POST /cart/remove              - Remove line
//! POST /cart/clear               - Empty the cart
//! GET  /cart/count               - Cart count badge
//!
//! # Checkout
//! POST /checkout                 - Order summary acknowledgment
//!
//! # Dealers
//! POST /dealer/applications      - Submit dealer application
//! GET  /dealer/applications/:id  - Application status
//!
//! # Contact
//! POST /contact                  - Contact message
//! ```

pub mod cart;
pub mod contact;
pub mod dealer;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", get(cart::items))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the dealer routes router.
pub fn dealer_routes() -> Router<AppState> {
    Router::new()
        .route("/applications", post(dealer::submit))
        .route("/applications/{id}", get(dealer::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/dealer", dealer_routes())
        .route("/contact", post(contact::submit))
}
