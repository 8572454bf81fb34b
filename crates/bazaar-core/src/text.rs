//! # Text Normalization
//!
//! Turns free text into comparable tokens: split on whitespace, lowercase,
//! drop empties. No stemming, no locale rules.
//!
//! ```text
//! "  Gaming\tLaptop ASUS\n"  ──►  ["gaming", "laptop", "asus"]
//! ```

/// Splits `text` on whitespace and lowercases each token.
///
/// Total and deterministic: empty or whitespace-only input yields an empty
/// vector.
///
/// ## Example
/// ```rust
/// use bazaar_core::text::normalize;
///
/// assert_eq!(normalize("Gaming  Laptop"), vec!["gaming", "laptop"]);
/// assert!(normalize(" \t\n").is_empty());
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
