//! # Validation Module
//!
//! Input validation utilities for Bazaar.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI command parser                                           │
//! │  ├── Arity and number format (`add <id> <qty>`)                        │
//! │  └── Immediate feedback, no core call                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantity bounds, cart size, query length                          │
//! │  └── Catalog / customer records on load                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart builder                                                 │
//! │  └── Stock check against the live catalog snapshot                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Customer, Product};
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_QUERY_LENGTH, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query's length.
///
/// Blank queries pass here; the fuzzy matcher reports them as
/// `EmptyQuery` once normalization yields no tokens.
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<&str> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LENGTH,
        });
    }

    Ok(query)
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before a new distinct product is added.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a loaded catalog: ids present and unique, names present,
/// prices in `0..=MAX_PRICE_CENTS`, stock at most `MAX_STOCK`.
pub fn validate_products(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        require("product id", &product.id)?;
        require("product name", &product.name)?;

        if product.price.is_negative() || product.price.cents() > MAX_PRICE_CENTS {
            return Err(ValidationError::OutOfRange {
                field: format!("price of {}", product.id),
                min: 0,
                max: MAX_PRICE_CENTS,
            });
        }

        if product.stock > MAX_STOCK {
            return Err(ValidationError::OutOfRange {
                field: format!("stock of {}", product.id),
                min: 0,
                max: i64::from(MAX_STOCK),
            });
        }

        if !seen.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a loaded customer list: ids present and unique, names present.
pub fn validate_customers(customers: &[Customer]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(customers.len());

    for customer in customers {
        require("customer id", &customer.id)?;
        require("customer name", &customer.name)?;

        if !seen.insert(customer.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "customer id".to_string(),
                value: customer.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
