//! # Catalog and Customer Files
//!
//! Both files are JSON arrays, loaded once at session start:
//!
//! ```json
//! [
//!   {
//!     "id": "LAP-1",
//!     "name": "Gaming Laptop ASUS",
//!     "description": "High-performance gaming computer",
//!     "tags": ["laptop", "gaming", "asus"],
//!     "category": "computers",
//!     "price_cents": 189900,
//!     "stock": 3
//!   }
//! ]
//! ```
//!
//! Any read, parse or validation failure is a `Load` error: without a
//! catalog the session has nothing to do.

use std::path::Path;

use bazaar_core::{Catalog, Customer, CustomerDirectory, Product};
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use crate::atomic::write_atomic;
use crate::error::{StoreError, StoreResult};

/// Reads and validates the product catalog.
pub async fn load_catalog(path: &Path) -> StoreResult<Catalog> {
    let products: Vec<Product> = read_json_array(path).await?;
    let catalog = Catalog::new(products).map_err(|e| StoreError::load(path, e))?;

    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Reads and validates the customer list.
pub async fn load_customers(path: &Path) -> StoreResult<CustomerDirectory> {
    let customers: Vec<Customer> = read_json_array(path).await?;
    let directory = CustomerDirectory::new(customers).map_err(|e| StoreError::load(path, e))?;

    info!(path = %path.display(), customers = directory.all().len(), "Customers loaded");
    Ok(directory)
}

/// Writes the catalog back (pretty JSON, whole-file replace).
pub async fn save_catalog(path: &Path, catalog: &Catalog) -> StoreResult<()> {
    let mut json = serde_json::to_vec_pretty(catalog.products())
        .map_err(|e| StoreError::persistence(path, e))?;
    json.push(b'\n');

    write_atomic(path, &json).await?;
    debug!(path = %path.display(), products = catalog.len(), "Catalog saved");
    Ok(())
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let bytes = fs::read(path).await.map_err(|e| StoreError::load(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::load(path, e))
}
