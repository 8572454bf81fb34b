//! # Store Facade
//!
//! Groups the three data files behind one handle.
//!
//! ```text
//! StoreConfig::new("data")        ← default file names under one directory
//!     .products_path(..)          ← override any single file
//!       │
//!       ▼
//! Store::new(config)
//!   ├── load_catalog()    → Catalog
//!   ├── load_customers()  → CustomerDirectory
//!   ├── save_catalog()    → products file rewritten
//!   └── orders()          → &OrderStore
//! ```

use std::path::{Path, PathBuf};

use bazaar_core::{Catalog, CustomerDirectory};

use crate::error::StoreResult;
use crate::loader;
use crate::orders::OrderStore;

pub const DEFAULT_PRODUCTS_FILE: &str = "products.json";
pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.json";
pub const DEFAULT_ORDERS_FILE: &str = "orders.jsonl";

// =============================================================================
// Configuration
// =============================================================================

/// Locations of the data files.
///
/// ## Example
/// ```rust
/// use bazaar_store::StoreConfig;
///
/// let config = StoreConfig::new("data").orders_path("/var/lib/bazaar/orders.jsonl");
/// assert!(config.products_path.ends_with("products.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub products_path: PathBuf,
    pub customers_path: PathBuf,
    pub orders_path: PathBuf,
}

impl StoreConfig {
    /// Default file names inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        StoreConfig {
            products_path: dir.join(DEFAULT_PRODUCTS_FILE),
            customers_path: dir.join(DEFAULT_CUSTOMERS_FILE),
            orders_path: dir.join(DEFAULT_ORDERS_FILE),
        }
    }

    pub fn products_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.products_path = path.into();
        self
    }

    pub fn customers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.customers_path = path.into();
        self
    }

    pub fn orders_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.orders_path = path.into();
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the shop's data files.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    orders: OrderStore,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        let orders = OrderStore::new(config.orders_path.clone());
        Store { config, orders }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn load_catalog(&self) -> StoreResult<Catalog> {
        loader::load_catalog(&self.config.products_path).await
    }

    pub async fn load_customers(&self) -> StoreResult<CustomerDirectory> {
        loader::load_customers(&self.config.customers_path).await
    }

    pub async fn save_catalog(&self, catalog: &Catalog) -> StoreResult<()> {
        loader::save_catalog(&self.config.products_path, catalog).await
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }
}
