//! Product route handlers.

use agrimart_core::{Category, Price, Product, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Products shown per listing page.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Product card data for the listing.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    /// "From ₹299", or empty when the product has no sizes.
    pub starting_price: String,
}

/// Size option on the product page.
#[derive(Clone)]
pub struct SizeView {
    pub size: String,
    pub price: String,
    pub stock: u32,
    pub in_stock: bool,
}

/// Product detail data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub sizes: Vec<SizeView>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.to_string(),
            starting_price: product
                .starting_price()
                .map(|p| format!("From {}", Price::store(p)))
                .unwrap_or_default(),
        }
    }
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.to_string(),
            sizes: product
                .sizes
                .iter()
                .map(|s| SizeView {
                    size: s.size.clone(),
                    price: Price::store(s.price).display(),
                    stock: s.stock,
                    in_stock: s.in_stock(),
                })
                .collect(),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub page: Option<usize>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<String>,
    /// Selected category, empty for all.
    pub current_category: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_more_pages: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// One page of a filtered product list.
#[derive(Debug)]
pub struct Page<'a> {
    pub products: Vec<&'a Product>,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Slice `products` into pages of `per_page`; out-of-range pages clamp to
/// the nearest valid page.
#[must_use]
pub fn paginate<'a>(products: &[&'a Product], page: usize, per_page: usize) -> Page<'a> {
    let per_page = per_page.max(1);
    let total_pages = products.len().div_ceil(per_page).max(1);
    let current_page = page.clamp(1, total_pages);

    Page {
        products: products
            .iter()
            .skip((current_page - 1) * per_page)
            .take(per_page)
            .copied()
            .collect(),
        current_page,
        total_pages,
    }
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let category = query
        .category
        .filter(|c| !c.trim().is_empty())
        .map(Category::from);

    let filtered: Vec<&Product> = match &category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.all().iter().collect(),
    };
    let page = paginate(&filtered, query.page.unwrap_or(1), PRODUCTS_PER_PAGE);

    ProductsIndexTemplate {
        products: page.products.into_iter().map(ProductCardView::from).collect(),
        categories: catalog
            .categories()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        current_category: category.as_ref().map(ToString::to_string).unwrap_or_default(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        has_more_pages: page.current_page < page.total_pages,
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(product),
    })
}
