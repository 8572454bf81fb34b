//! # Domain Types
//!
//! Core domain types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  product_id     │       │
//! │  │  name / desc    │   │  customer (copy)│   │  name_snapshot  │       │
//! │  │  tags, category │   │  items          │   │  unit_price     │       │
//! │  │  price, stock   │   │  status, total  │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │  OrderStatus    │                             │
//! │  │  (closed enum)  │   │  Processing     │                             │
//! │  │  electronics    │   │  Pending        │                             │
//! │  │  books, ...     │   │  Shipped, ...   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Products are owned by the catalog. Orders never point back at them: an
//! order carries a copy of the customer and of each product's name and
//! price as they were at assembly time, so later catalog edits cannot
//! rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Closed set: a catalog file naming anything else fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Computers,
    Accessories,
    Audio,
    Gaming,
    Books,
    Clothing,
    Home,
    Sports,
    Grocery,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Computers,
        Category::Accessories,
        Category::Audio,
        Category::Gaming,
        Category::Books,
        Category::Clothing,
        Category::Home,
        Category::Sports,
        Category::Grocery,
    ];

    /// Lowercase name as written in catalog files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Computers => "computers",
            Category::Accessories => "accessories",
            Category::Audio => "audio",
            Category::Gaming => "gaming",
            Category::Books => "books",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Sports => "sports",
            Category::Grocery => "grocery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse. Returns `Err(())` for unknown names; callers
/// filtering by category treat that as "no matches".
impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Immutable except `stock`, which only [`crate::catalog::Catalog::reserve`]
/// decrements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier (e.g. `LAPTOP-ASUS-01`).
    pub id: String,

    /// Display name, searched by the ranking engine.
    pub name: String,

    /// Free-text description, searched by the ranking engine.
    #[serde(default)]
    pub description: String,

    /// Ordered tags; the best single tag match counts toward the score.
    #[serde(default)]
    pub tags: Vec<String>,

    pub category: Category,

    /// Price in cents.
    #[serde(rename = "price_cents")]
    pub price: Money,

    /// Units on hand.
    pub stock: u32,
}

impl Product {
    /// Checks whether `quantity` units can be taken from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer who can place orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// ## Lifecycle
/// ```text
/// Processing ──► Pending ──► Shipped ──► Delivered
///      │            │
///      └────────────┴──────► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just assembled and handed to the store.
    #[default]
    Processing,
    /// Accepted, awaiting fulfilment.
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if fulfilment may move an order from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Processing, Pending)
                | (Pending, Shipped)
                | (Shipped, Delivered)
                | (Processing, Cancelled)
                | (Pending, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    /// Product name at time of order (frozen).
    pub name_snapshot: String,
    /// Category at time of order (frozen).
    pub category_snapshot: Category,
    /// Unit price in cents at time of order (frozen).
    #[serde(rename = "unit_price_cents")]
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A committed order.
///
/// Built once by [`crate::order::OrderAssembler`] and immutable afterwards;
/// status changes go through [`Order::with_status`], which returns a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// `ORDER-<yyyyMMdd-HHmmss>-<suffix>`.
    pub id: String,
    /// Customer at time of order (frozen).
    pub customer: Customer,
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    #[serde(rename = "total_amount_cents")]
    pub total_amount: Money,
}

impl Order {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Returns a copy of this order with `status` applied.
    ///
    /// ## Errors
    /// `InvalidStatusTransition` if the lifecycle forbids the move.
    pub fn with_status(&self, status: OrderStatus) -> CoreResult<Order> {
        if !self.status.can_transition_to(status) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: status,
            });
        }

        Ok(Order {
            status,
            ..self.clone()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
