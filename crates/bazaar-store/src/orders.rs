//! # Order Store
//!
//! Append-only order history in JSON Lines: one complete order object per
//! line, readable with any text tool.
//!
//! ## Append Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append(order)                                                         │
//! │                                                                         │
//! │  orders.jsonl (N lines) ──read──► buffer                               │
//! │                                     │ + serialized order + '\n'        │
//! │                                     ▼                                   │
//! │                          .orders.jsonl.<uuid>.tmp ──fsync──► rename     │
//! │                                                                │        │
//! │                                     orders.jsonl (N+1 lines) ◄─┘        │
//! │                                                                         │
//! │  Any failure before the rename leaves the N-line file as it was, so    │
//! │  the same Order can be appended again once the fault is fixed.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole file is rewritten on every append. Order histories for a
//! single shop session stay small enough that this is not a concern.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bazaar_core::Order;
use tokio::fs;
use tracing::{debug, info};

use crate::atomic::write_atomic;
use crate::error::{StoreError, StoreResult};

/// Durable, append-only order history.
#[derive(Debug, Clone)]
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    /// Store backed by `path`. Nothing is touched until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        OrderStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `order` as one JSON line.
    ///
    /// The order counts as placed only once this returns `Ok`.
    ///
    /// ## Errors
    /// `Persistence` on any filesystem failure; the existing history is
    /// unchanged and the call can be retried with the same order.
    pub async fn append(&self, order: &Order) -> StoreResult<()> {
        let record =
            serde_json::to_string(order).map_err(|e| StoreError::persistence(&self.path, e))?;

        let mut contents = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(StoreError::persistence(&self.path, err)),
        };

        // Keep a foreign partial line separate from the new record
        if contents.last().is_some_and(|b| *b != b'\n') {
            contents.push(b'\n');
        }
        contents.extend_from_slice(record.as_bytes());
        contents.push(b'\n');

        write_atomic(&self.path, &contents).await?;

        info!(
            order_id = %order.id,
            total = %order.total_amount,
            path = %self.path.display(),
            "Order persisted"
        );
        Ok(())
    }

    /// Every stored order, oldest first.
    ///
    /// A missing file is an empty history. Blank lines are ignored.
    ///
    /// ## Errors
    /// - `Load` if the file exists but cannot be read
    /// - `Decode` for the first line that is not a complete order
    pub async fn load_all(&self) -> StoreResult<Vec<Order>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::load(&self.path, err)),
        };

        let mut orders = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let order: Order = serde_json::from_str(line).map_err(|e| StoreError::Decode {
                line: index + 1,
                reason: e.to_string(),
            })?;
            orders.push(order);
        }

        debug!(path = %self.path.display(), orders = orders.len(), "Orders loaded");
        Ok(orders)
    }

    /// Looks up one order by id.
    pub async fn find(&self, order_id: &str) -> StoreResult<Option<Order>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|o| o.id == order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{Catalog, CartBuilder, Category, Customer, Money, OrderAssembler, Product};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: "KB-1".to_string(),
                name: "Mechanical Keyboard".to_string(),
                description: String::new(),
                tags: vec!["keyboard".to_string()],
                category: Category::Accessories,
                price: Money::from_cents(8950),
                stock: 7,
            },
            Product {
                id: "HS-1".to_string(),
                name: "Headset".to_string(),
                description: String::new(),
                tags: Vec::new(),
                category: Category::Audio,
                price: Money::from_cents(4999),
                stock: 2,
            },
        ])
        .unwrap()
    }

    fn order(catalog: &Catalog, lines: &[(&str, u32)]) -> Order {
        let customer = Customer {
            id: "C1".to_string(),
            name: "Ada".to_string(),
            email: String::new(),
            address: String::new(),
        };
        let mut builder = CartBuilder::new(catalog);
        for (id, qty) in lines {
            builder.add(id, *qty).unwrap();
        }
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();
        OrderAssembler.assemble(&customer, &cart).unwrap()
    }

    #[tokio::test]
    async fn test_append_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path().join("orders.jsonl"));
        let catalog = catalog();
        let order = order(&catalog, &[("KB-1", 2), ("HS-1", 1)]);

        store.append(&order).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, order.id);
        assert_eq!(loaded[0].total_amount, Money::from_cents(2 * 8950 + 4999));
        assert_eq!(loaded[0], order);
    }

    #[tokio::test]
    async fn test_each_append_is_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path().join("orders.jsonl"));
        let catalog = catalog();
        let first = order(&catalog, &[("KB-1", 1)]);
        let second = order(&catalog, &[("HS-1", 2)]);

        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let text = fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));

        let ids: Vec<String> = store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path().join("orders.jsonl"));
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(store.find("ORDER-X").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_retry_after_directory_appears() {
        let dir = tempfile::tempdir().unwrap();
        let orders_dir = dir.path().join("orders");
        let store = OrderStore::new(orders_dir.join("orders.jsonl"));
        let catalog = catalog();
        let order = order(&catalog, &[("KB-1", 1)]);

        let err = store.append(&order).await.unwrap_err();
        assert!(err.is_retryable());

        fs::create_dir(&orders_dir).await.unwrap();
        store.append(&order).await.unwrap();

        assert_eq!(store.find(&order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn test_stale_temp_file_does_not_affect_reads() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path().join("orders.jsonl"));
        let catalog = catalog();
        let order = order(&catalog, &[("HS-1", 1)]);
        store.append(&order).await.unwrap();

        // Residue of a writer that died before its rename
        fs::write(dir.path().join(".orders.jsonl.dead.tmp"), "{\"id\":\"ORD")
            .await
            .unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, vec![order.clone()]);

        let next = order_with_suffix(&order, "again");
        store.append(&next).await.unwrap();
        assert_eq!(store.load_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_partial_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::new(dir.path().join("orders.jsonl"));
        let catalog = catalog();
        let order = order(&catalog, &[("KB-1", 1)]);
        store.append(&order).await.unwrap();

        let mut text = fs::read_to_string(store.path()).await.unwrap();
        text.push_str("{\"id\":\"ORDER-");
        fs::write(store.path(), text).await.unwrap();

        match store.load_all().await {
            Err(StoreError::Decode { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected decode error, got {:?}", other),
        }

        // A new append lands on its own line; the bad line stays visible
        store.append(&order).await.unwrap();
        assert!(matches!(
            store.load_all().await,
            Err(StoreError::Decode { line: 2, .. })
        ));
    }

    fn order_with_suffix(order: &Order, suffix: &str) -> Order {
        Order {
            id: format!("{}-{}", order.id, suffix),
            ..order.clone()
        }
    }
}
