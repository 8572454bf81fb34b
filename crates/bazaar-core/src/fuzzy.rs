//! # Fuzzy Matching
//!
//! Scores how well a query matches one target string.
//!
//! ## Scoring Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  score(query, target)                                                   │
//! │                                                                         │
//! │  query  "gaming computer"          target "Gaming Laptop ASUS"         │
//! │          │                                 │                            │
//! │          ▼ normalize                       ▼ normalize                  │
//! │  ["gaming", "computer"]            ["gaming", "laptop", "asus"]        │
//! │                                                                         │
//! │  "gaming"   contained in 1 target token  → 1                           │
//! │  "computer" contained in 0 target tokens → 0                           │
//! │                                                                         │
//! │  score = (1 + 0) / 2 query tokens = 0.5                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A query token hits when a target token *contains* it, so `"lap"` hits
//! `"laptop"` but `"laptops"` does not. The score is unbounded above: a
//! token found in three target tokens contributes 3.

use crate::error::{CoreError, CoreResult};
use crate::text::normalize;

/// Scores `target` against `query`.
///
/// ## Errors
/// `EmptyQuery` when the query normalizes to zero tokens. Callers are
/// expected to guard blank input before scoring.
///
/// ## Example
/// ```rust
/// use bazaar_core::fuzzy::score;
///
/// let s = score("gaming computer", "High-performance gaming computer").unwrap();
/// assert_eq!(s, 1.0);
/// assert!(score("   ", "anything").is_err());
/// ```
pub fn score(query: &str, target: &str) -> CoreResult<f64> {
    let query_tokens = normalize(query);
    score_tokens(&query_tokens, target)
}

/// Same as [`score`] for a query that is already normalized.
///
/// The ranking engine normalizes the query once and calls this for every
/// field of every product.
pub fn score_tokens(query_tokens: &[String], target: &str) -> CoreResult<f64> {
    if query_tokens.is_empty() {
        return Err(CoreError::EmptyQuery);
    }

    let target_tokens = normalize(target);

    let hits: usize = query_tokens
        .iter()
        .map(|q| {
            target_tokens
                .iter()
                .filter(|t| t.contains(q.as_str()))
                .count()
        })
        .sum();

    Ok(hits as f64 / query_tokens.len() as f64)
}
