//! # Cart Builder
//!
//! Accumulates cart lines for one session, validating every add against the
//! catalog snapshot it borrows.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              select(id)               choose_quantity(n)                │
//! │  ┌──────────┐ ─────────► ┌───────────┐ ───────────────► ┌──────────┐   │
//! │  │ Browsing │            │ Selecting │   ok or error    │ Browsing │   │
//! │  └──────────┘ ◄───────── └───────────┘                  └──────────┘   │
//! │       │      cancel_selection                                          │
//! │       │                                                                 │
//! │       │ finish()   (non-empty cart only, else EmptyCart)               │
//! │       ▼                                                                 │
//! │  ┌───────────┐                                                          │
//! │  │ Reviewing │  terminal: into_cart() hands the Cart to OrderAssembler │
//! │  └───────────┘                                                          │
//! │                                                                         │
//! │  add(id, n) = select(id) + choose_quantity(n) in one step              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - One line per product; adding the same product again sums quantities
//! - For every line, `quantity <= product.stock` at the time of the add
//! - A failed add leaves the cart exactly as it was

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_cart_size, validate_quantity};

// =============================================================================
// Cart Line
// =============================================================================

/// One aggregated cart entry. Borrows the product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    /// Current catalog price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The lines of an in-progress order, in the order they were first added.
///
/// Only [`CartBuilder`] can mutate a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
}

impl<'a> Cart<'a> {
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Line for `product_id`, if the product is in the cart.
    pub fn line(&self, product_id: &str) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of line totals at current catalog prices.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

/// Cart totals for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&Cart<'_>> for CartTotals {
    fn from(cart: &Cart<'_>) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Cart Phase
// =============================================================================

/// Where the builder is in its state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum CartPhase {
    Browsing,
    /// A product has been picked; waiting for its quantity.
    Selecting { product_id: String },
    Reviewing,
}

impl CartPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CartPhase::Browsing => "browsing",
            CartPhase::Selecting { .. } => "selecting",
            CartPhase::Reviewing => "reviewing",
        }
    }
}

// =============================================================================
// Cart Builder
// =============================================================================

/// Drives a [`Cart`] through the session state machine.
///
/// Borrows the catalog for its whole lifetime, so stock cannot change under
/// it. Stock is only decremented by [`Catalog::reserve`] once the builder
/// (and any cart borrowed from it) is gone.
#[derive(Debug, Clone)]
pub struct CartBuilder<'a> {
    catalog: &'a Catalog,
    cart: Cart<'a>,
    phase: CartPhase,
}

impl<'a> CartBuilder<'a> {
    /// Empty cart in `Browsing`.
    pub fn new(catalog: &'a Catalog) -> Self {
        CartBuilder {
            catalog,
            cart: Cart::default(),
            phase: CartPhase::Browsing,
        }
    }

    pub fn phase(&self) -> &CartPhase {
        &self.phase
    }

    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Quantity of `product_id` already in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.cart.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Picks a product, moving to `Selecting`.
    ///
    /// Picking again while `Selecting` replaces the pending product.
    ///
    /// ## Errors
    /// - `InvalidCartState` once the cart is under review
    /// - `ProductNotFound` (phase unchanged)
    pub fn select(&mut self, product_id: &str) -> CoreResult<&'a Product> {
        if self.phase == CartPhase::Reviewing {
            return Err(self.invalid_state("select a product"));
        }

        let product = self.catalog.require(product_id)?;
        self.phase = CartPhase::Selecting {
            product_id: product.id.clone(),
        };
        debug!(product_id = %product.id, "Product selected");
        Ok(product)
    }

    /// Drops the pending selection and returns to `Browsing`.
    pub fn cancel_selection(&mut self) {
        if matches!(self.phase, CartPhase::Selecting { .. }) {
            self.phase = CartPhase::Browsing;
        }
    }

    /// Adds `quantity` of the selected product and returns to `Browsing`.
    ///
    /// The builder is back in `Browsing` whether or not the add succeeded.
    ///
    /// ## Errors
    /// - `InvalidCartState` if no product is selected
    /// - `Validation` for a quantity outside `1..=999` or a full cart
    /// - `InsufficientStock` when existing + new exceeds stock
    pub fn choose_quantity(&mut self, quantity: u32) -> CoreResult<&CartLine<'a>> {
        let product_id = match &self.phase {
            CartPhase::Selecting { product_id } => product_id.clone(),
            _ => return Err(self.invalid_state("choose a quantity")),
        };
        self.phase = CartPhase::Browsing;

        let product = self.catalog.require(&product_id)?;
        self.merge_line(product, quantity)
    }

    /// Selects `product_id` and adds `quantity` in one step.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::{Catalog, CartBuilder, CoreError, Money};
    /// use bazaar_core::types::{Category, Product};
    ///
    /// let catalog = Catalog::new(vec![Product {
    ///     id: "LAP-1".into(),
    ///     name: "Gaming Laptop ASUS".into(),
    ///     description: String::new(),
    ///     tags: Vec::new(),
    ///     category: Category::Computers,
    ///     price: Money::from_cents(189900),
    ///     stock: 3,
    /// }])
    /// .unwrap();
    ///
    /// let mut builder = CartBuilder::new(&catalog);
    /// assert!(matches!(
    ///     builder.add("LAP-1", 5),
    ///     Err(CoreError::InsufficientStock { requested: 5, available: 3, .. })
    /// ));
    /// assert!(builder.cart().is_empty());
    /// ```
    pub fn add(&mut self, product_id: &str, quantity: u32) -> CoreResult<&CartLine<'a>> {
        self.select(product_id)?;
        self.choose_quantity(quantity)
    }

    /// Moves to `Reviewing`.
    ///
    /// Calling it again while already reviewing is a no-op.
    ///
    /// ## Errors
    /// - `EmptyCart` (stays in `Browsing`)
    /// - `InvalidCartState` while a product is awaiting its quantity
    pub fn finish(&mut self) -> CoreResult<&Cart<'a>> {
        match self.phase {
            CartPhase::Reviewing => return Ok(&self.cart),
            CartPhase::Selecting { .. } => return Err(self.invalid_state("finish")),
            CartPhase::Browsing => {}
        }

        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        self.phase = CartPhase::Reviewing;
        debug!(
            lines = self.cart.line_count(),
            total = %self.cart.total(),
            "Cart finalized"
        );
        Ok(&self.cart)
    }

    /// Hands over the finalized cart.
    ///
    /// ## Errors
    /// `InvalidCartState` unless the builder is `Reviewing`.
    pub fn into_cart(self) -> CoreResult<Cart<'a>> {
        if self.phase != CartPhase::Reviewing {
            return Err(self.invalid_state("hand over the cart"));
        }
        Ok(self.cart)
    }

    fn merge_line(&mut self, product: &'a Product, quantity: u32) -> CoreResult<&CartLine<'a>> {
        validate_quantity(quantity)?;

        let existing = self.cart.lines.iter().position(|l| l.product.id == product.id);
        let already = existing.map_or(0, |i| self.cart.lines[i].quantity);

        // Saturating so that an absurd total still reports as insufficient stock
        let requested = already.saturating_add(quantity);
        if !product.can_sell(requested) {
            debug!(product_id = %product.id, requested, available = product.stock, "Add rejected");
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                requested,
                available: product.stock,
            });
        }

        let index = match existing {
            Some(i) => {
                self.cart.lines[i].quantity = requested;
                i
            }
            None => {
                validate_cart_size(self.cart.lines.len())?;
                self.cart.lines.push(CartLine { product, quantity });
                self.cart.lines.len() - 1
            }
        };

        debug!(product_id = %product.id, quantity = requested, "Cart line updated");
        Ok(&self.cart.lines[index])
    }

    fn invalid_state(&self, operation: &'static str) -> CoreError {
        CoreError::InvalidCartState {
            phase: self.phase.name(),
            operation,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
