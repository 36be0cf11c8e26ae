//! Cart route handlers.
//!
//! Every handler works on a [`SessionCart`]: the visitor's cart is opened
//! for the request, at most one cart operation is applied, and the snapshot
//! is saved before the response is built from the post-operation state.

use agrimart_core::{CartLine, CartStore, KeyValueStore, Price, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::SessionCart;
use crate::state::AppState;

/// Message returned by the checkout placeholder.
pub const CHECKOUT_MESSAGE: &str = "Checkout functionality coming soon";

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub size: String,
    pub unit_price: Decimal,
    pub formatted_unit_price: String,
    pub quantity: u32,
    pub line_total: Decimal,
    pub formatted_line_total: String,
}

/// Cart display data, shared by the JSON API and the cart page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u64,
    pub total_price: Decimal,
    pub formatted_total: String,
}

impl CartView {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let unit_price = line.unit_price();
        let line_total = line.line_total();
        Self {
            product_id: line.product.id.to_string(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            size: line.size.clone(),
            unit_price,
            formatted_unit_price: Price::store(unit_price).display(),
            quantity: line.quantity,
            line_total,
            formatted_line_total: Price::store(line_total).display(),
        }
    }
}

impl<S: KeyValueStore> From<&CartStore<S>> for CartView {
    fn from(store: &CartStore<S>) -> Self {
        let total_price = store.total_price();
        Self {
            items: store.cart_items().iter().map(CartItemView::from).collect(),
            total_items: store.total_items(),
            total_price,
            formatted_total: Price::store(total_price).display(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub size: String,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product_id: String,
    pub size: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: String,
    pub size: String,
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Checkout placeholder response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
    pub order: CartView,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(cart))]
pub async fn show(cart: SessionCart) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from(cart.store()),
    }
}

/// Current cart as JSON.
#[instrument(skip(cart))]
pub async fn items(cart: SessionCart) -> Json<CartView> {
    Json(CartView::from(cart.store()))
}

/// Add one unit of a product size to the cart.
///
/// The product must exist in the catalog and offer the requested size.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(request.product_id);
    let product = state
        .catalog()
        .get(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    if !product.has_size(&request.size) {
        return Err(AppError::BadRequest(format!(
            "{} is not available in size {}",
            product.name, request.size
        )));
    }

    cart.store_mut().add_to_cart(product, &request.size);
    cart.save().await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str()), ("size", request.size.as_str())]),
    );
    tracing::info!(product_id = %product_id, size = %request.size, "Added to cart");

    Ok(Json(CartView::from(cart.store())))
}

/// Set the quantity of a cart line. Quantities below 1 are ignored.
#[instrument(skip(cart))]
pub async fn update(
    mut cart: SessionCart,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(request.product_id);
    cart.store_mut()
        .update_quantity(&product_id, &request.size, request.quantity);
    cart.save().await?;

    Ok(Json(CartView::from(cart.store())))
}

/// Remove a cart line.
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: SessionCart,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(request.product_id);
    cart.store_mut().remove_from_cart(&product_id, &request.size);
    cart.save().await?;

    Ok(Json(CartView::from(cart.store())))
}

/// Empty the cart.
#[instrument(skip(cart))]
pub async fn clear(mut cart: SessionCart) -> Result<Json<CartView>> {
    cart.store_mut().clear_cart();
    cart.save().await?;

    Ok(Json(CartView::from(cart.store())))
}

/// Cart count badge.
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> Json<CartCount> {
    Json(CartCount {
        count: cart.store().total_items(),
    })
}

/// Acknowledge a checkout request.
///
/// There is no order pipeline yet: the response echoes what would be
/// ordered and the cart is left as it is.
#[instrument(skip(cart))]
pub async fn checkout(cart: SessionCart) -> Result<impl IntoResponse> {
    let order = CartView::from(cart.store());
    if order.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    tracing::info!(
        lines = order.items.len(),
        total_items = order.total_items,
        total = %order.total_price,
        "Checkout requested"
    );

    Ok((
        StatusCode::OK,
        Json(CheckoutResponse {
            message: CHECKOUT_MESSAGE,
            order,
        }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agrimart_core::{Catalog, MemoryStore};

    #[test]
    fn test_cart_view_from_store() {
        let catalog = Catalog::seed();
        let seeds = catalog.get(&ProductId::new("1")).unwrap();
        let fertilizer = catalog.get(&ProductId::new("2")).unwrap();

        let mut store = CartStore::hydrate(MemoryStore::new());
        store.add_to_cart(seeds, "5kg");
        store.add_to_cart(seeds, "5kg");
        store.add_to_cart(fertilizer, "10kg");

        let view = CartView::from(&store);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_price, Decimal::from(2 * 1299 + 899));
        assert_eq!(view.formatted_total, "₹3497.00");
        assert_eq!(view.items[0].formatted_line_total, "₹2598.00");
        assert_eq!(view.items[1].formatted_unit_price, "₹899.00");
    }

    #[test]
    fn test_cart_view_json_shape() {
        let store = CartStore::hydrate(MemoryStore::new());
        let json = serde_json::to_value(CartView::from(&store)).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert_eq!(json["totalPrice"], "0");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
