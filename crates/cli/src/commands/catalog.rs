//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in catalog
//! agrimart catalog list
//!
//! # List products from a catalog file
//! agrimart catalog list --catalog products.yaml
//! ```
//!
//! Catalog files are YAML lists of products:
//!
//! ```yaml
//! - id: "1"
//!   name: Premium Seeds
//!   description: High-quality seeds for better yield
//!   image: https://example.com/seeds.jpg
//!   category: seeds
//!   sizes:
//!     - { size: 1kg, price: "299", stock: 50 }
//! ```

use std::path::Path;

use agrimart_core::{Catalog, Price};

use super::CommandError;

/// Load the catalog from `path`, or the built-in catalog when no path is
/// given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<Catalog, CommandError> {
    let Some(path) = path else {
        return Ok(Catalog::seed());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| CommandError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog: Catalog =
        serde_yaml::from_str(&raw).map_err(|source| CommandError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;
    catalog
        .validate()
        .map_err(|source| CommandError::CatalogInvalid {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Log every product and its sizes.
pub fn list(catalog: &Catalog) {
    if catalog.is_empty() {
        tracing::info!("Catalog is empty");
        return;
    }

    for product in catalog.all() {
        tracing::info!(
            id = %product.id,
            category = %product.category,
            "{}",
            product.name
        );
        for size in &product.sizes {
            tracing::info!(
                "    {:<20} {:>12}  stock {}",
                size.size,
                Price::store(size.price).display(),
                size.stock
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agrimart_core::{CatalogError, Category, ProductId};
    use rust_decimal::Decimal;

    #[test]
    fn test_load_defaults_to_seed_catalog() {
        let catalog = load(None).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_yaml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.yaml");
        std::fs::write(
            &path,
            r#"
- id: "7"
  name: Neem Oil
  description: Organic pest control
  image: ""
  category: pesticides
  sizes:
    - { size: 500ml, price: "349", stock: 12 }
    - { size: 1L, price: "599", stock: 0 }
"#,
        )
        .unwrap();

        let catalog = load(Some(&path)).unwrap();
        let neem = catalog.get(&ProductId::new("7")).unwrap();
        assert_eq!(neem.category, Category::Other("pesticides".to_string()));
        assert_eq!(neem.price_of("1L"), Decimal::from(599));
        assert!(!neem.size("1L").unwrap().in_stock());
    }

    #[test]
    fn test_load_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load(Some(&dir.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(missing, CommandError::CatalogRead { .. }));

        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "- id: [not, a, string\n").unwrap();
        let broken = load(Some(&path)).unwrap_err();
        assert!(matches!(broken, CommandError::CatalogParse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_products() {
        let dir = tempfile::tempdir().unwrap();

        let doubled = dir.path().join("doubled.yaml");
        std::fs::write(
            &doubled,
            r#"
- id: "7"
  name: Neem Oil
  description: ""
  image: ""
  category: pesticides
  sizes:
    - { size: 1L, price: "599", stock: 3 }
    - { size: 1L, price: "549", stock: 3 }
"#,
        )
        .unwrap();
        let err = load(Some(&doubled)).unwrap_err();
        assert!(matches!(
            err,
            CommandError::CatalogInvalid {
                source: CatalogError::DuplicateSize { .. },
                ..
            }
        ));

        let negative = dir.path().join("negative.yaml");
        std::fs::write(
            &negative,
            r#"
- id: "8"
  name: Sprayer
  description: ""
  image: ""
  category: tools
  sizes:
    - { size: 16L, price: "-10", stock: 2 }
"#,
        )
        .unwrap();
        let err = load(Some(&negative)).unwrap_err();
        assert!(matches!(
            err,
            CommandError::CatalogInvalid {
                source: CatalogError::NegativePrice { .. },
                ..
            }
        ));
    }
}
