//! In-memory dealer application registry.
//!
//! Applications live for the lifetime of the process. Each email may have at
//! most one pending application; once it is decided a new one may be filed.

mod error;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use agrimart_core::dealer::DealerApplication;
use agrimart_core::DealerApplicationId;

pub use error::DealerRegistryError;

/// Shared registry of dealer applications.
///
/// Cheaply cloneable; clones share the same applications.
#[derive(Debug, Clone, Default)]
pub struct DealerRegistry {
    applications: Arc<RwLock<HashMap<DealerApplicationId, DealerApplication>>>,
}

impl DealerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validated application.
    ///
    /// # Errors
    ///
    /// Returns [`DealerRegistryError::AlreadyPending`] if the same email has
    /// an application that is still pending.
    pub fn submit(
        &self,
        application: DealerApplication,
    ) -> Result<DealerApplication, DealerRegistryError> {
        let mut applications = self
            .applications
            .write()
            .map_err(|_| DealerRegistryError::Poisoned)?;

        let pending = applications
            .values()
            .any(|a| a.email == application.email && a.status.is_open());
        if pending {
            return Err(DealerRegistryError::AlreadyPending(application.email));
        }

        applications.insert(application.id, application.clone());
        drop(applications);

        tracing::info!(
            application_id = %application.id,
            business = %application.business_name,
            "Dealer application recorded"
        );
        Ok(application)
    }

    /// Look up an application by id.
    ///
    /// # Errors
    ///
    /// Returns [`DealerRegistryError::Poisoned`] if the lock is poisoned.
    pub fn get(
        &self,
        id: DealerApplicationId,
    ) -> Result<Option<DealerApplication>, DealerRegistryError> {
        let applications = self
            .applications
            .read()
            .map_err(|_| DealerRegistryError::Poisoned)?;
        Ok(applications.get(&id).cloned())
    }
}
