//! # Ranking Engine
//!
//! Scores every product against a query and returns the matches, best first.
//!
//! ## Per-Product Score
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total = name + description + best tag                                  │
//! │                                                                         │
//! │  name         fuzzy(query, product.name)                               │
//! │  description  fuzzy(query, product.description)                        │
//! │  best tag     max over tags of fuzzy(query, tag), 0 with no tags       │
//! │                                                                         │
//! │  Fields are summed, not averaged: a product matching in all three      │
//! │  fields outranks one matching in a single field. Tags contribute only  │
//! │  their single best match so a long tail of unrelated tags cannot       │
//! │  dilute one relevant tag.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Descending score. Products scoring exactly zero are dropped. Equal scores
//! keep catalog order (stable sort, no secondary key).

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::fuzzy::score_tokens;
use crate::text::normalize;
use crate::types::Product;

/// One ranked search result.
///
/// Borrowed from the catalog snapshot; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub product: &'a Product,
    /// Always > 0 for hits returned by [`rank`].
    pub score: f64,
}

/// Score breakdown for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldScores {
    pub name: f64,
    pub description: f64,
    pub best_tag: f64,
}

impl FieldScores {
    #[inline]
    pub fn total(&self) -> f64 {
        self.name + self.description + self.best_tag
    }
}

/// Computes the per-field scores of `product` for pre-normalized query tokens.
pub fn score_fields(query_tokens: &[String], product: &Product) -> CoreResult<FieldScores> {
    let name = score_tokens(query_tokens, &product.name)?;
    let description = score_tokens(query_tokens, &product.description)?;

    let mut best_tag = 0.0_f64;
    for tag in &product.tags {
        best_tag = best_tag.max(score_tokens(query_tokens, tag)?);
    }

    Ok(FieldScores {
        name,
        description,
        best_tag,
    })
}

/// Total relevance of one product for `query`.
///
/// ## Errors
/// `EmptyQuery` if `query` is blank.
pub fn score_product(query: &str, product: &Product) -> CoreResult<f64> {
    let tokens = normalize(query);
    Ok(score_fields(&tokens, product)?.total())
}

/// Ranks `items` against `query`.
///
/// ## Errors
/// `EmptyQuery` if `query` is blank, even when `items` is empty.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::ranking::rank;
/// use bazaar_core::types::{Category, Product};
///
/// let laptop = Product {
///     id: "LAP-1".into(),
///     name: "Gaming Laptop ASUS".into(),
///     description: "High-performance gaming computer".into(),
///     tags: vec!["laptop".into(), "gaming".into(), "asus".into()],
///     category: Category::Computers,
///     price: Money::from_cents(189900),
///     stock: 3,
/// };
///
/// let hits = rank("gaming computer", std::slice::from_ref(&laptop)).unwrap();
/// assert_eq!(hits[0].score, 2.0);
/// ```
pub fn rank<'a>(query: &str, items: &'a [Product]) -> CoreResult<Vec<SearchHit<'a>>> {
    let tokens = normalize(query);
    if tokens.is_empty() {
        return Err(CoreError::EmptyQuery);
    }

    let mut hits = Vec::new();
    for product in items {
        let score = score_fields(&tokens, product)?.total();
        if score > 0.0 {
            hits.push(SearchHit { product, score });
        }
    }

    // Vec::sort_by is stable: ties keep catalog order.
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        query = %query,
        candidates = items.len(),
        hits = hits.len(),
        "Ranked products"
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::score;
    use crate::money::Money;
    use crate::types::Category;

    fn product(id: &str, name: &str, description: &str, tags: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: Category::Electronics,
            price: Money::from_cents(1000),
            stock: 10,
        }
    }

    fn gaming_laptop() -> Product {
        product(
            "LAP-1",
            "Gaming Laptop ASUS",
            "High-performance gaming computer",
            &["laptop", "gaming", "asus"],
        )
    }

    #[test]
    fn test_worked_example_scores_two() {
        let tokens = normalize("gaming computer");
        let fields = score_fields(&tokens, &gaming_laptop()).unwrap();

        assert_eq!(fields.name, 0.5);
        assert_eq!(fields.description, 1.0);
        assert_eq!(fields.best_tag, 0.5);
        assert_eq!(fields.total(), 2.0);
    }

    #[test]
    fn test_zero_score_items_are_removed() {
        let items = vec![
            gaming_laptop(),
            product("KB-1", "Mechanical Keyboard", "Clicky switches", &["keyboard"]),
        ];
        let hits = rank("gaming", &items).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].product.id, "LAP-1");
        assert!(hits.iter().all(|h| h.score > 0.0));
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let items = vec![
            product("A", "Mouse", "Wireless mouse", &[]),
            product("B", "Wireless Mouse", "Wireless mouse", &["wireless"]),
            product("C", "Cable", "Wireless charging cable", &[]),
        ];
        let hits = rank("wireless", &items).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.product.id.as_str()).collect();

        assert_eq!(ids, vec!["B", "A", "C"]);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let items = vec![
            product("first", "USB Hub", "", &[]),
            product("second", "USB Cable", "", &[]),
            product("third", "USB Stick", "", &[]),
        ];
        let hits = rank("usb", &items).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.product.id.as_str()).collect();

        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_score_is_sum_of_fields_with_single_best_tag() {
        let q = "speaker";
        let item = product("S", "speaker", "speaker", &["speaker", "speaker", "other"]);

        let expected = 3.0 * score(q, q).unwrap();
        assert_eq!(score_product(q, &item).unwrap(), expected);
    }

    #[test]
    fn test_best_tag_not_diluted_by_other_tags() {
        let one_tag = product("A", "x", "y", &["headphones"]);
        let many_tags = product("B", "x", "y", &["headphones", "red", "sale", "new", "gift"]);

        assert_eq!(
            score_product("headphones", &one_tag).unwrap(),
            score_product("headphones", &many_tags).unwrap()
        );
    }

    #[test]
    fn test_empty_query_propagates() {
        let items = vec![gaming_laptop()];
        assert_eq!(rank("  ", &items), Err(CoreError::EmptyQuery));
        assert_eq!(rank("", &[]), Err(CoreError::EmptyQuery));
    }

    #[test]
    fn test_no_tags_contributes_zero() {
        let item = product("A", "Desk Lamp", "", &[]);
        let fields = score_fields(&normalize("lamp"), &item).unwrap();
        assert_eq!(fields.best_tag, 0.0);
        assert_eq!(fields.total(), 1.0);
    }
}
