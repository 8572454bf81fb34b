//! # Order Assembly
//!
//! Turns a finalized cart and a customer into an immutable [`Order`].
//!
//! ## Snapshot Pattern
//! ```text
//! Cart (borrows catalog)                 Order (owns everything)
//! ──────────────────────                 ───────────────────────
//! CartLine { &Product, qty }   ──────►   OrderLine { product_id,
//!                                                    name_snapshot,
//!                                                    category_snapshot,
//!                                                    unit_price, qty }
//! &Customer                    ──────►   Customer (cloned)
//! ```
//!
//! After assembly the order no longer refers to the catalog, so later price
//! or name edits cannot rewrite history.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Customer, Order, OrderLine, OrderStatus};

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORDER";

/// Builds orders from finalized carts.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderAssembler;

impl OrderAssembler {
    /// Assembles an order timestamped now.
    ///
    /// ## Errors
    /// `EmptyCart` if `cart` has no lines. A cart handed over by
    /// [`crate::cart::CartBuilder::into_cart`] is never empty.
    pub fn assemble(&self, customer: &Customer, cart: &Cart<'_>) -> CoreResult<Order> {
        self.assemble_at(customer, cart, Utc::now())
    }

    /// Assembles an order with an explicit timestamp.
    pub fn assemble_at(
        &self,
        customer: &Customer,
        cart: &Cart<'_>,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let items: Vec<OrderLine> = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id.clone(),
                name_snapshot: line.product.name.clone(),
                category_snapshot: line.product.category,
                unit_price: line.product.price,
                quantity: line.quantity,
            })
            .collect();

        let total_amount: Money = items.iter().map(OrderLine::line_total).sum();

        let order = Order {
            id: generate_order_id(now),
            customer: customer.clone(),
            items,
            status: OrderStatus::Processing,
            order_date: now,
            total_amount,
        };

        info!(
            order_id = %order.id,
            customer_id = %order.customer.id,
            lines = order.items.len(),
            total = %order.total_amount,
            "Order assembled"
        );
        Ok(order)
    }
}

/// `ORDER-<yyyyMMdd-HHmmss>-<8 hex chars>`.
///
/// The timestamp prefix sorts ids by creation second; the random suffix
/// keeps ids distinct within one second.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        ORDER_ID_PREFIX,
        now.format("%Y%m%d-%H%M%S"),
        &suffix[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartBuilder;
    use crate::catalog::Catalog;
    use crate::types::{Category, Product};
    use crate::{MAX_PRICE_CENTS, MAX_STOCK};
    use chrono::TimeZone;

    fn product(id: &str, name: &str, cents: i64, stock: u32) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            tags: Vec::new(),
            category: Category::Audio,
            price: Money::from_cents(cents),
            stock,
        }
    }

    fn customer() -> Customer {
        Customer {
            id: "C1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Analytical St".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("HP-1", "Studio Headphones", 14999, 5),
            product("SP-1", "Bluetooth Speaker", 4950, 8),
        ])
        .unwrap()
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let catalog = catalog();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("HP-1", 2).unwrap();
        builder.add("SP-1", 3).unwrap();
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();

        let order = OrderAssembler.assemble(&customer(), &cart).unwrap();

        assert_eq!(order.total_amount, Money::from_cents(2 * 14999 + 3 * 4950));
        assert_eq!(order.total_amount, cart.total());
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn test_lines_snapshot_product_data() {
        let catalog = catalog();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("SP-1", 1).unwrap();
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();

        let order = OrderAssembler.assemble(&customer(), &cart).unwrap();
        drop(cart);

        let line = &order.items[0];
        assert_eq!(line.product_id, "SP-1");
        assert_eq!(line.name_snapshot, "Bluetooth Speaker");
        assert_eq!(line.category_snapshot, Category::Audio);
        assert_eq!(line.unit_price, Money::from_cents(4950));
        assert_eq!(order.customer, customer());
    }

    #[test]
    fn test_price_change_after_assembly_does_not_affect_order() {
        let mut catalog = catalog();
        let order = {
            let mut builder = CartBuilder::new(&catalog);
            builder.add("HP-1", 1).unwrap();
            builder.finish().unwrap();
            let cart = builder.into_cart().unwrap();
            OrderAssembler.assemble(&customer(), &cart).unwrap()
        };

        catalog.reserve(&order).unwrap();
        let repriced = Catalog::new(
            catalog
                .products()
                .iter()
                .cloned()
                .map(|mut p| {
                    p.price = Money::from_cents(1);
                    p
                })
                .collect(),
        )
        .unwrap();

        assert_eq!(repriced.get("HP-1").unwrap().price, Money::from_cents(1));
        assert_eq!(order.total_amount, Money::from_cents(14999));
    }

    #[test]
    fn test_price_that_could_overflow_totals_is_rejected() {
        let result = Catalog::new(vec![product("BIG", "Yacht", i64::MAX / 2 + 1, 5)]);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_largest_allowed_price_and_stock_assemble_exactly() {
        let catalog = Catalog::new(vec![
            product("BIG", "Yacht", MAX_PRICE_CENTS, MAX_STOCK),
            product("HP-1", "Studio Headphones", 14999, 5),
        ])
        .unwrap();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("BIG", 999).unwrap();
        builder.add("BIG", 999).unwrap();
        builder.add("HP-1", 1).unwrap();
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();

        let order = OrderAssembler.assemble(&customer(), &cart).unwrap();
        assert_eq!(
            order.total_amount.cents(),
            MAX_PRICE_CENTS * 1998 + 14999
        );
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let cart = Cart::default();
        assert_eq!(
            OrderAssembler.assemble(&customer(), &cart),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_order_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let id = generate_order_id(now);

        assert!(id.starts_with("ORDER-20240309-140507-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_order_ids_are_distinct_within_one_second() {
        let now = Utc::now();
        assert_ne!(generate_order_id(now), generate_order_id(now));
    }

    #[test]
    fn test_assemble_at_uses_given_time() {
        let catalog = catalog();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("HP-1", 1).unwrap();
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();

        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let order = OrderAssembler.assemble_at(&customer(), &cart, now).unwrap();
        assert_eq!(order.order_date, now);
        assert!(order.id.starts_with("ORDER-20250102-030405-"));
    }
}
