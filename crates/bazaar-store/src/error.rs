//! # Store Error Types
//!
//! Error types for file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError (catalog validation)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path / line context                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in bazaar-cli) ← Code + message for the operator            │
//! │       │                                                                 │
//! │       ├── Load        → session cannot start                           │
//! │       ├── Persistence → keep the assembled order, offer retry          │
//! │       └── Decode      → order history is unreadable at that line       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog or customer file could not be read, parsed or validated.
    ///
    /// ## When This Occurs
    /// - File missing or unreadable
    /// - Malformed JSON, unknown category
    /// - Duplicate ids, blank names, negative prices
    #[error("Failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    /// A write did not complete. The canonical file is untouched.
    ///
    /// ## When This Occurs
    /// - Directory missing
    /// - Permission denied
    /// - Disk full
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// An order record could not be decoded.
    ///
    /// `line` is 1-based.
    #[error("Corrupt order record at line {line}: {reason}")]
    Decode { line: usize, reason: String },
}

impl StoreError {
    pub fn load(path: &Path, reason: impl ToString) -> Self {
        StoreError::Load {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence(path: &Path, reason: impl ToString) -> Self {
        StoreError::Persistence(format!("{}: {}", path.display(), reason.to_string()))
    }

    /// True when the same operation may succeed once the fault clears.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
