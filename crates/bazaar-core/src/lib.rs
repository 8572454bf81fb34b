//! # bazaar-core: Pure Business Logic for Bazaar
//!
//! Product search, cart building and order assembly as pure functions over
//! an in-memory catalog snapshot. No file, network or console access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bazaar-cli (driver)                          │   │
//! │  │    config ──► load ──► command loop ──► commit with retry       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bazaar-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   text ──► fuzzy ──► ranking ──► catalog (CatalogQuery)         │   │
//! │  │                                     │                           │   │
//! │  │                       cart (CartBuilder) ──► order (Assembler)  │   │
//! │  │                                                                 │   │
//! │  │   session: the entry points a driver calls                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Order (owned snapshot)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                bazaar-store (flat files)                        │   │
//! │  │        catalog/customer JSON, OrderStore (JSON Lines)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`text`] - Whitespace tokenizer
//! - [`fuzzy`] - Query-vs-string containment score
//! - [`ranking`] - Multi-field product scoring and ordering
//! - [`catalog`] - Catalog snapshot, queries, stock reservation, customers
//! - [`cart`] - Cart state machine with stock validation
//! - [`order`] - Order assembly and ids
//! - [`session`] - Driver-facing entry points
//! - [`types`] - Domain types (Product, Customer, Order, etc.)
//! - [`money`] - Integer-cents money type
//! - [`error`] - Domain error types
//! - [`validation`] - Input and record validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{Catalog, Customer, Money, ShopSession};
//! use bazaar_core::types::{Category, Product};
//!
//! let catalog = Catalog::new(vec![Product {
//!     id: "LAP-1".into(),
//!     name: "Gaming Laptop ASUS".into(),
//!     description: "High-performance gaming computer".into(),
//!     tags: vec!["laptop".into(), "gaming".into(), "asus".into()],
//!     category: Category::Computers,
//!     price: Money::from_cents(189900),
//!     stock: 3,
//! }])
//! .unwrap();
//! let customer = Customer {
//!     id: "C1".into(),
//!     name: "Ada".into(),
//!     email: String::new(),
//!     address: String::new(),
//! };
//!
//! let mut session = ShopSession::new(&catalog, &customer);
//! assert_eq!(session.search("gaming computer").unwrap()[0].score, 2.0);
//!
//! session.add_to_cart("LAP-1", 2).unwrap();
//! let order = session.finish_cart().unwrap();
//! assert_eq!(order.total_amount, Money::from_cents(379800));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod fuzzy;
pub mod money;
pub mod order;
pub mod ranking;
pub mod session;
pub mod text;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartBuilder, CartLine, CartPhase, CartTotals};
pub use catalog::{Catalog, CatalogQuery, CustomerDirectory};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::OrderAssembler;
pub use ranking::SearchHit;
pub use session::ShopSession;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products in one cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single product in one add.
///
/// Catches typos like 1000 for 10 before the stock check does.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum search text length, in characters.
pub const MAX_QUERY_LENGTH: usize = 100;

/// Highest unit price a catalog may carry, in cents ($100,000,000.00).
///
/// Together with [`MAX_STOCK`] and [`MAX_CART_LINES`] this keeps every
/// line total and order total well inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

/// Highest stock level a catalog may carry for one product.
pub const MAX_STOCK: u32 = 1_000_000;
