//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - Search, cart and order rule violations         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bazaar-store errors (separate crate)                                  │
//! │  └── StoreError       - Load / persistence failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → re-prompt              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is recoverable by the caller: the session keeps its
//! cart and the driver re-prompts.

use thiserror::Error;

use crate::money::Money;
use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The search text normalized to zero tokens.
    ///
    /// ## When This Occurs
    /// - Empty query
    /// - Whitespace-only query (`"  \t "`)
    #[error("Search query is empty")]
    EmptyQuery,

    /// Price range filter with `min > max`.
    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidRange { min: Money, max: Money },

    /// Requested quantity (existing line + new) exceeds current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// add LAPTOP-01 5
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "LAPTOP-01", requested: 5, available: 3 }
    ///      │
    ///      ▼
    /// Cart unchanged, driver re-prompts
    /// ```
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// Tried to finish a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product id is not in the catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer id is not in the customer directory.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The cart builder is not in a state that allows the operation.
    ///
    /// ## When This Occurs
    /// - Adding items after `finish` moved the cart to review
    /// - Choosing a quantity with no product selected
    #[error("Cart is {phase}, cannot {operation}")]
    InvalidCartState {
        phase: &'static str,
        operation: &'static str,
    },

    /// Order status change not allowed by the lifecycle table.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate product id in a catalog file).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "LAPTOP-01".to_string(),
            requested: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for LAPTOP-01: requested 5, available 3"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_status_transition_message() {
        let err = CoreError::InvalidStatusTransition {
            order_id: "ORDER-1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing,
        };
        assert_eq!(
            err.to_string(),
            "Order ORDER-1 cannot move from delivered to processing"
        );
    }
}
