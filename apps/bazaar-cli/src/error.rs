//! # CLI Error Type
//!
//! Unified error type for everything the driver reports.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bazaar                                 │
//! │                                                                         │
//! │  CommandError (bad line)  ──┐                                          │
//! │  CoreError    (rule)      ──┼──► CliError { code, message }            │
//! │  StoreError   (file)      ──┤          │                               │
//! │  io / toml    (ambient)   ──┘          ▼                               │
//! │                              error[INSUFFICIENT_STOCK]: ...            │
//! │                                                                         │
//! │  Inside a session: printed, cart kept, next line read                  │
//! │  At startup:       session aborted, exit code 1                        │
//! │  At commit:        retryable codes offer another attempt               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use bazaar_core::{CoreError, ValidationError};
use bazaar_store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::command::CommandError;

/// Error surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error[{code}]: {message}")]
pub struct CliError {
    /// Machine-readable error code for scripted drivers
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Line could not be parsed as a command
    InvalidCommand,

    /// Input validation failed
    ValidationError,

    /// Product or customer id unknown
    NotFound,

    /// Requested quantity exceeds stock
    InsufficientStock,

    /// Finished an empty cart
    EmptyCart,

    /// Operation not allowed in the cart's current phase
    InvalidState,

    /// Catalog or customer file unusable
    LoadFailed,

    /// Order or catalog write failed
    PersistenceFailed,

    /// Order history has an undecodable record
    CorruptData,

    /// Configuration file problem
    ConfigError,

    /// Console or other I/O failure
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCommand => "INVALID_COMMAND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::LoadFailed => "LOAD_FAILED",
            ErrorCode::PersistenceFailed => "PERSISTENCE_FAILED",
            ErrorCode::CorruptData => "CORRUPT_DATA",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    /// True when repeating the same step may succeed.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::PersistenceFailed
    }
}

/// Converts core errors. All of them are operator-recoverable.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::EmptyQuery | CoreError::InvalidRange { .. } => ErrorCode::ValidationError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::ProductNotFound(id) => return CliError::not_found("Product", id),
            CoreError::CustomerNotFound(id) => return CliError::not_found("Customer", id),
            CoreError::InvalidCartState { .. } | CoreError::InvalidStatusTransition { .. } => {
                ErrorCode::InvalidState
            }
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Converts store errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Load { .. } => ErrorCode::LoadFailed,
            StoreError::Persistence(reason) => {
                error!("Persistence failed: {}", reason);
                ErrorCode::PersistenceFailed
            }
            StoreError::Decode { .. } => ErrorCode::CorruptData,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::new(ErrorCode::InvalidCommand, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Internal, format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(format!("Invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::config(format!("Could not write config: {}", err))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
