//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::config::StorefrontConfig;
use crate::db::{CatalogError, CustomerRepository, MelonCatalog, RepositoryError};

/// Error building application state at startup.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to load melon catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to load customers: {0}")]
    Customers(#[from] RepositoryError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the customer store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: MelonCatalog,
    customers: CustomerRepository,
}

impl AppState {
    /// Load the catalog and customer files named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing or malformed.
    pub fn load(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = MelonCatalog::load(&config.melons_file)?;
        if catalog.is_empty() {
            tracing::warn!(path = %config.melons_file.display(), "Melon catalog is empty");
        }
        let customers = CustomerRepository::load(&config.customers_file)?;

        Ok(Self::new(config, catalog, customers))
    }

    /// Create application state from already-loaded parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: MelonCatalog,
        customers: CustomerRepository,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                customers,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the melon catalog.
    #[must_use]
    pub fn catalog(&self) -> &MelonCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the customer repository.
    #[must_use]
    pub fn customers(&self) -> &CustomerRepository {
        &self.inner.customers
    }
}
