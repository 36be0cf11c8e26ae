//! Product catalog reference data.
//!
//! Products are immutable records supplied by the catalog source. The cart
//! keeps its own denormalized copy of a [`Product`] at the time it was added
//! and never refreshes it from the catalog.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog that breaks a product invariant.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A product lists the same size label twice.
    #[error("product {product} lists size {size} more than once")]
    DuplicateSize { product: ProductId, size: String },

    /// A size has a negative price.
    #[error("product {product} size {size} has a negative price")]
    NegativePrice { product: ProductId, size: String },
}

/// A purchasable variant of a product (e.g., the 5kg bag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    /// Size label, unique within its product.
    pub size: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Units on hand.
    pub stock: u32,
}

impl ProductSize {
    /// Create a size entry.
    #[must_use]
    pub fn new(size: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            size: size.into(),
            price,
            stock,
        }
    }

    /// Whether at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Product category.
///
/// The known categories get their own variants; anything else the catalog
/// source sends is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Seeds,
    Fertilizer,
    Tools,
    Other(String),
}

impl Category {
    /// Returns the lowercase label used in URLs and JSON.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Seeds => "seeds",
            Self::Fertilizer => "fertilizer",
            Self::Tools => "tools",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "seeds" => Self::Seeds,
            "fertilizer" => Self::Fertilizer,
            "tools" => Self::Tools,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::from(label.to_owned())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product with its purchasable sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub category: Category,
    /// Ordered size list; labels are unique within the product.
    pub sizes: Vec<ProductSize>,
}

impl Product {
    /// Look up a size entry by its label.
    #[must_use]
    pub fn size(&self, label: &str) -> Option<&ProductSize> {
        self.sizes.iter().find(|s| s.size == label)
    }

    /// Whether the product offers a size with this label.
    #[must_use]
    pub fn has_size(&self, label: &str) -> bool {
        self.size(label).is_some()
    }

    /// Lowest unit price across all sizes ("from ₹299").
    #[must_use]
    pub fn starting_price(&self) -> Option<Decimal> {
        self.sizes.iter().map(|s| s.price).min()
    }

    /// Price of the given size, or zero when the product has no such size.
    #[must_use]
    pub fn price_of(&self, label: &str) -> Decimal {
        self.size(label).map_or(Decimal::ZERO, |s| s.price)
    }
}

/// In-memory product catalog.
///
/// Serializes as a plain product list, the format of catalog files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a product list, preserving order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in product list.
    #[must_use]
    pub fn seed() -> Self {
        const IMAGE: &str = "https://images.pexels.com/photos/2255935/pexels-photo-2255935.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

        let product = |id: &str, name: &str, description: &str, category, sizes| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            image: IMAGE.to_owned(),
            category,
            sizes,
        };

        Self::new(vec![
            product(
                "1",
                "Premium Seeds",
                "High-quality seeds for better yield",
                Category::Seeds,
                vec![
                    ProductSize::new("1kg", Decimal::from(299), 50),
                    ProductSize::new("5kg", Decimal::from(1299), 20),
                    ProductSize::new("10kg", Decimal::from(2299), 10),
                ],
            ),
            product(
                "2",
                "Organic Fertilizer",
                "Natural fertilizer for healthy crops",
                Category::Fertilizer,
                vec![
                    ProductSize::new("5kg", Decimal::from(499), 30),
                    ProductSize::new("10kg", Decimal::from(899), 15),
                    ProductSize::new("25kg", Decimal::from(1999), 8),
                ],
            ),
            product(
                "3",
                "Farm Tools",
                "Essential tools for modern farming",
                Category::Tools,
                vec![
                    ProductSize::new("Basic Set", Decimal::from(999), 20),
                    ProductSize::new("Professional Set", Decimal::from(2499), 10),
                ],
            ),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in the given category, in catalog order.
    ///
    /// The iterator borrows only the catalog, not `category`.
    pub fn by_category<'a>(
        &'a self,
        category: &Category,
    ) -> impl Iterator<Item = &'a Product> + use<'a> {
        let category = category.clone();
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Check that product ids are unique, size labels are unique within
    /// each product and no price is negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::with_capacity(self.products.len());
        for product in &self.products {
            if !ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }

            let mut labels = HashSet::with_capacity(product.sizes.len());
            for size in &product.sizes {
                if !labels.insert(size.size.as_str()) {
                    return Err(CatalogError::DuplicateSize {
                        product: product.id.clone(),
                        size: size.size.clone(),
                    });
                }
                if size.price < Decimal::ZERO {
                    return Err(CatalogError::NegativePrice {
                        product: product.id.clone(),
                        size: size.size.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for product in &self.products {
            if !seen.contains(&&product.category) {
                seen.push(&product.category);
            }
        }
        seen
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_contents() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 3);

        let seeds = catalog.get(&ProductId::new("1")).unwrap();
        assert_eq!(seeds.name, "Premium Seeds");
        assert_eq!(seeds.price_of("5kg"), Decimal::from(1299));
        assert_eq!(seeds.size("10kg").unwrap().stock, 10);
    }

    #[test]
    fn test_unknown_size_prices_at_zero() {
        let catalog = Catalog::seed();
        let tools = catalog.get(&ProductId::new("3")).unwrap();
        assert!(!tools.has_size("5kg"));
        assert_eq!(tools.price_of("5kg"), Decimal::ZERO);
    }

    #[test]
    fn test_starting_price_is_lowest_size() {
        let catalog = Catalog::seed();
        let fertilizer = catalog.get(&ProductId::new("2")).unwrap();
        assert_eq!(fertilizer.starting_price(), Some(Decimal::from(499)));
    }

    #[test]
    fn test_by_category_and_categories() {
        let catalog = Catalog::seed();
        let tools: Vec<_> = catalog.by_category(&Category::Tools).collect();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Farm Tools");

        let labels: Vec<_> = catalog.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(labels, ["seeds", "fertilizer", "tools"]);
    }

    #[test]
    fn test_by_category_outlives_the_category() {
        let catalog = Catalog::seed();
        let seeds: Vec<&Product> = {
            let wanted = Category::from("seeds".to_string());
            catalog.by_category(&wanted).collect()
        };
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].name, "Premium Seeds");
    }

    #[test]
    fn test_seed_catalog_is_valid() {
        assert_eq!(Catalog::seed().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_broken_products() {
        let mut repeated = Catalog::seed();
        let tools = repeated.products[2].clone();
        repeated.products.push(tools);
        assert_eq!(
            repeated.validate(),
            Err(CatalogError::DuplicateProduct(ProductId::new("3")))
        );

        let mut doubled = Catalog::seed();
        doubled.products[0]
            .sizes
            .push(ProductSize::new("5kg", Decimal::from(1), 1));
        assert!(matches!(
            doubled.validate(),
            Err(CatalogError::DuplicateSize { size, .. }) if size == "5kg"
        ));

        let mut negative = Catalog::seed();
        negative.products[1].sizes[0].price = Decimal::from(-5);
        assert!(matches!(
            negative.validate(),
            Err(CatalogError::NegativePrice { product, .. }) if product.as_str() == "2"
        ));
    }

    #[test]
    fn test_category_serde_keeps_unknown_labels() {
        let json = serde_json::to_string(&Category::Seeds).unwrap();
        assert_eq!(json, "\"seeds\"");

        let other: Category = serde_json::from_str("\"irrigation\"").unwrap();
        assert_eq!(other, Category::Other("irrigation".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"irrigation\"");
    }

    #[test]
    fn test_missing_product() {
        assert!(Catalog::seed().get(&ProductId::new("404")).is_none());
        assert!(Catalog::default().is_empty());
    }

    #[test]
    fn test_catalog_json_is_a_product_list() {
        let json = r#"[{
            "id": "9",
            "name": "Drip Kit",
            "description": "Irrigation starter kit",
            "image": "",
            "category": "irrigation",
            "sizes": [{"size": "Small", "price": "750", "stock": 4}]
        }]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);

        let kit = catalog.get(&ProductId::new("9")).unwrap();
        assert_eq!(kit.price_of("Small"), Decimal::from(750));
        assert_eq!(kit.category, Category::Other("irrigation".to_string()));
    }
}
