//! # Catalog
//!
//! The session's product snapshot and the read-only queries over it.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog (owns Vec<Product>)                                           │
//! │     │                                                                   │
//! │     ├──► CatalogQuery<'a>   search / category / price   (borrows)      │
//! │     │                                                                   │
//! │     ├──► CartBuilder<'a>    stock checks, CartLine refs  (borrows)     │
//! │     │                                                                   │
//! │     └──► reserve(&Order)    the only stock decrement     (&mut, after  │
//! │                             every borrow has ended)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The borrow checker enforces the single-session model: while any query or
//! cart holds the snapshot, nothing can mutate it.

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::ranking::{rank, SearchHit};
use crate::types::{Category, Customer, Order, Product};
use crate::validation::{validate_customers, validate_products, validate_search_query};

// =============================================================================
// Catalog
// =============================================================================

/// In-memory product snapshot for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from loaded products.
    ///
    /// ## Errors
    /// `Validation` for duplicate ids, blank names or negative prices.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        validate_products(&products)?;
        Ok(Catalog { products })
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, product_id: &str) -> CoreResult<&Product> {
        self.get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Read-only query view over this snapshot.
    pub fn query(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(&self.products)
    }

    /// Takes the ordered quantities of a placed order out of stock.
    ///
    /// All-or-nothing: every line is checked first, and stock is only
    /// decremented when all of them fit. Lines for the same product are
    /// summed before checking.
    ///
    /// ## Errors
    /// - `ProductNotFound` if a line references a product no longer in the
    ///   catalog
    /// - `InsufficientStock` if a line asks for more than is on hand
    pub fn reserve(&mut self, order: &Order) -> CoreResult<()> {
        let mut wanted: Vec<(usize, u32)> = Vec::with_capacity(order.items.len());

        for line in &order.items {
            let idx = self
                .products
                .iter()
                .position(|p| p.id == line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            match wanted.iter_mut().find(|(i, _)| *i == idx) {
                Some((_, qty)) => *qty = qty.saturating_add(line.quantity),
                None => wanted.push((idx, line.quantity)),
            }
        }

        for &(idx, qty) in &wanted {
            let product = &self.products[idx];
            if !product.can_sell(qty) {
                return Err(CoreError::InsufficientStock {
                    product_id: product.id.clone(),
                    requested: qty,
                    available: product.stock,
                });
            }
        }

        for (idx, qty) in wanted {
            let product = &mut self.products[idx];
            product.stock -= qty;
            debug!(product_id = %product.id, reserved = qty, remaining = product.stock, "Stock reserved");
        }

        info!(order_id = %order.id, lines = order.items.len(), "Stock reserved for order");
        Ok(())
    }
}

// =============================================================================
// Catalog Query
// =============================================================================

/// Search and filter operations over an immutable product slice.
///
/// All three operations are independent and side-effect free; the session
/// may interleave them freely with cart updates.
#[derive(Debug, Clone, Copy)]
pub struct CatalogQuery<'a> {
    products: &'a [Product],
}

impl<'a> CatalogQuery<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        CatalogQuery { products }
    }

    /// Ranked fuzzy search across name, description and tags.
    ///
    /// ## Errors
    /// - `EmptyQuery` for blank text
    /// - `Validation` for overly long text
    pub fn search(&self, query: &str) -> CoreResult<Vec<SearchHit<'a>>> {
        let query = validate_search_query(query)?;
        rank(query, self.products)
    }

    /// Products whose category equals `category`, ignoring case.
    ///
    /// An unknown category name is not an error; it simply matches nothing.
    pub fn filter_by_category(&self, category: &str) -> Vec<&'a Product> {
        let Ok(wanted) = category.parse::<Category>() else {
            debug!(category = %category, "Unknown category, no matches");
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category == wanted)
            .collect()
    }

    /// Products priced within `[min, max]`, both bounds inclusive.
    ///
    /// ## Errors
    /// `InvalidRange` if `min > max`.
    pub fn filter_by_price_range(&self, min: Money, max: Money) -> CoreResult<Vec<&'a Product>> {
        if min > max {
            return Err(CoreError::InvalidRange { min, max });
        }

        Ok(self
            .products
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .collect())
    }
}

// =============================================================================
// Customer Directory
// =============================================================================

/// Customers available for selection at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    /// ## Errors
    /// `Validation` for duplicate ids or blank names.
    pub fn new(customers: Vec<Customer>) -> CoreResult<Self> {
        validate_customers(&customers)?;
        Ok(CustomerDirectory { customers })
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Looks up a customer by id, failing with `CustomerNotFound`.
    pub fn find(&self, customer_id: &str) -> CoreResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
