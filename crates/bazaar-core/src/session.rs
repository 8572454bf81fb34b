//! # Shop Session
//!
//! The command surface a driver (interactive console, script, test) talks
//! to. Each call returns a structured result; nothing here prints.
//!
//! ```text
//! driver ──► search / filter_category / filter_price ──► CatalogQuery
//!        ──► add_to_cart / finish_cart               ──► CartBuilder
//!                                                          │
//!                                         finish_cart ─────┴──► OrderAssembler ──► Order
//! ```
//!
//! Queries never touch the cart, so browsing and cart state can interleave
//! freely.

use tracing::debug;

use crate::cart::{Cart, CartBuilder, CartLine, CartPhase};
use crate::catalog::{Catalog, CatalogQuery};
use crate::error::CoreResult;
use crate::money::Money;
use crate::order::OrderAssembler;
use crate::ranking::SearchHit;
use crate::types::{Customer, Order, Product};

/// One customer's shopping session over a catalog snapshot.
#[derive(Debug, Clone)]
pub struct ShopSession<'a> {
    customer: &'a Customer,
    query: CatalogQuery<'a>,
    builder: CartBuilder<'a>,
    assembler: OrderAssembler,
}

impl<'a> ShopSession<'a> {
    pub fn new(catalog: &'a Catalog, customer: &'a Customer) -> Self {
        debug!(customer_id = %customer.id, products = catalog.len(), "Session started");
        ShopSession {
            customer,
            query: catalog.query(),
            builder: CartBuilder::new(catalog),
            assembler: OrderAssembler,
        }
    }

    pub fn customer(&self) -> &'a Customer {
        self.customer
    }

    pub fn cart(&self) -> &Cart<'a> {
        self.builder.cart()
    }

    pub fn phase(&self) -> &CartPhase {
        self.builder.phase()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.builder.quantity_of(product_id)
    }

    pub fn search(&self, text: &str) -> CoreResult<Vec<SearchHit<'a>>> {
        self.query.search(text)
    }

    pub fn filter_category(&self, category: &str) -> Vec<&'a Product> {
        self.query.filter_by_category(category)
    }

    pub fn filter_price(&self, min: Money, max: Money) -> CoreResult<Vec<&'a Product>> {
        self.query.filter_by_price_range(min, max)
    }

    pub fn add_to_cart(&mut self, product_id: &str, quantity: u32) -> CoreResult<&CartLine<'a>> {
        self.builder.add(product_id, quantity)
    }

    /// Closes the cart and assembles the order.
    ///
    /// The cart stays under review afterwards; further adds fail with
    /// `InvalidCartState`. Calling again assembles a fresh order (new id
    /// and timestamp) from the same cart.
    ///
    /// ## Errors
    /// `EmptyCart` with nothing in the cart; the session keeps browsing.
    pub fn finish_cart(&mut self) -> CoreResult<Order> {
        let cart = self.builder.finish()?;
        self.assembler.assemble(self.customer, cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{Category, OrderStatus};

    fn catalog() -> Catalog {
        let product = |id: &str, name: &str, tags: &[&str], category, cents, stock| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category,
            price: Money::from_cents(cents),
            stock,
        };
        Catalog::new(vec![
            product("LAP-1", "Gaming Laptop ASUS", &["laptop", "gaming"], Category::Computers, 189900, 3),
            product("CTL-1", "Wireless Controller", &["gaming"], Category::Gaming, 5999, 12),
            product("BK-1", "Rust in Action", &["book"], Category::Books, 3999, 4),
        ])
        .unwrap()
    }

    fn customer() -> Customer {
        Customer {
            id: "C1".to_string(),
            name: "Grace".to_string(),
            email: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn test_full_session_flow() {
        let catalog = catalog();
        let customer = customer();
        let mut session = ShopSession::new(&catalog, &customer);

        let hits = session.search("gaming").unwrap();
        assert_eq!(hits[0].product.id, "LAP-1");

        session.add_to_cart("CTL-1", 2).unwrap();
        assert_eq!(session.filter_category("books").len(), 1);
        session.add_to_cart("BK-1", 1).unwrap();

        let order = session.finish_cart().unwrap();
        assert_eq!(order.customer.id, "C1");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, Money::from_cents(2 * 5999 + 3999));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(session.phase(), &CartPhase::Reviewing);
    }

    #[test]
    fn test_queries_do_not_touch_cart() {
        let catalog = catalog();
        let customer = customer();
        let mut session = ShopSession::new(&catalog, &customer);
        session.add_to_cart("BK-1", 2).unwrap();
        let before = session.cart().clone();

        let _ = session.search("laptop");
        let _ = session.search("   ");
        let _ = session.filter_category("gaming");
        let _ = session.filter_price(Money::from_cents(10), Money::from_cents(1));

        assert_eq!(session.cart(), &before);
    }

    #[test]
    fn test_errors_keep_session_usable() {
        let catalog = catalog();
        let customer = customer();
        let mut session = ShopSession::new(&catalog, &customer);

        assert_eq!(session.finish_cart().unwrap_err(), CoreError::EmptyCart);
        assert!(matches!(
            session.add_to_cart("LAP-1", 5),
            Err(CoreError::InsufficientStock { requested: 5, available: 3, .. })
        ));
        assert_eq!(session.search("").unwrap_err(), CoreError::EmptyQuery);

        session.add_to_cart("LAP-1", 3).unwrap();
        assert_eq!(session.quantity_of("LAP-1"), 3);
        assert!(session.finish_cart().is_ok());
    }

    #[test]
    fn test_adding_after_finish_is_rejected() {
        let catalog = catalog();
        let customer = customer();
        let mut session = ShopSession::new(&catalog, &customer);
        session.add_to_cart("BK-1", 1).unwrap();
        session.finish_cart().unwrap();

        assert!(matches!(
            session.add_to_cart("BK-1", 1),
            Err(CoreError::InvalidCartState { .. })
        ));
    }

    #[test]
    fn test_filter_price_range() {
        let catalog = catalog();
        let customer = customer();
        let session = ShopSession::new(&catalog, &customer);

        let found = session
            .filter_price("$30".parse().unwrap(), "60.00".parse().unwrap())
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["CTL-1", "BK-1"]);
    }
}
