//! # bazaar-store: Flat-File Storage for Bazaar
//!
//! Loads the catalog and customers, writes the catalog back, and keeps the
//! order history. All I/O is async (tokio).
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  products.json  ──load_catalog──►    Catalog    ──save_catalog──►  (same│
//! │                                                                   file)│
//! │  customers.json ──load_customers──► CustomerDirectory                  │
//! │                                                                         │
//! │  Order ──OrderStore::append──► orders.jsonl ──load_all / find──► Order │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Path configuration and the `Store` facade
//! - [`loader`] - Catalog and customer JSON files
//! - [`orders`] - JSON Lines order history
//! - [`atomic`] - Temp + fsync + rename file replacement
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("data"));
//! let catalog = store.load_catalog().await?;
//! store.orders().append(&order).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod atomic;
pub mod error;
pub mod loader;
pub mod orders;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use orders::OrderStore;
pub use store::{Store, StoreConfig};
