//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use agrimart_core::Catalog;

use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::services::{CartRegistry, DealerRegistry};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, configuration and the visitor carts
/// that sessions point into.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    dealers: DealerRegistry,
    carts: CartRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog served by the storefront
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                dealers: DealerRegistry::new(),
                carts: CartRegistry::new(Duration::from_secs(
                    SESSION_EXPIRY_SECONDS.unsigned_abs(),
                )),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the dealer application registry.
    #[must_use]
    pub fn dealers(&self) -> &DealerRegistry {
        &self.inner.dealers
    }

    /// Get a reference to the visitor cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }
}
