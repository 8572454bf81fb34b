//! # Rendering
//!
//! Plain-text views of core results. Every function returns a `String`; the
//! shop loop decides where it goes.

use std::fmt::Write;

use bazaar_core::{Cart, CartTotals, Customer, Order, Product, SearchHit};

pub fn hits(hits: &[SearchHit<'_>], limit: usize) -> String {
    if hits.is_empty() {
        return "No matching products.".to_string();
    }

    let mut text = String::new();
    for (rank, hit) in hits.iter().take(limit).enumerate() {
        let _ = writeln!(
            text,
            "{:>3}. {}  score {:.2}",
            rank + 1,
            product_summary(hit.product),
            hit.score
        );
    }
    if hits.len() > limit {
        let _ = writeln!(text, "     ... {} more", hits.len() - limit);
    }
    text.trim_end().to_string()
}

pub fn products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No matching products.".to_string();
    }

    products
        .iter()
        .map(|p| format!("  {}", product_summary(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn product_summary(product: &Product) -> String {
    format!(
        "[{}] {} ({}) {}, {} in stock",
        product.id, product.name, product.category, product.price, product.stock
    )
}

pub fn cart(cart: &Cart<'_>) -> String {
    if cart.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut text = String::from("Cart:\n");
    for line in cart.lines() {
        let _ = writeln!(
            text,
            "  {:<12} {:<32} x{:<4} {:>12}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.line_total().to_string()
        );
    }
    let totals = CartTotals::from(cart);
    let _ = write!(
        text,
        "  {} products, {} items, total {}",
        totals.line_count, totals.total_quantity, totals.total
    );
    text
}

pub fn order(order: &Order) -> String {
    let mut text = format!(
        "Order {} for {} ({})\n  placed {}\n",
        order.id,
        order.customer.name,
        order.status,
        order.order_date.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for line in &order.items {
        let _ = writeln!(
            text,
            "  {:<12} {:<32} {} x{} = {}",
            line.product_id,
            line.name_snapshot,
            line.unit_price,
            line.quantity,
            line.line_total()
        );
    }
    let _ = write!(text, "  Total: {}", order.total_amount);
    text
}

/// One line per order, for history listings.
pub fn order_list(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }

    orders
        .iter()
        .map(|o| {
            format!(
                "{}  {:<20} {:>3} items  {:>12}  {}",
                o.id,
                o.customer.name,
                o.total_quantity(),
                o.total_amount.to_string(),
                o.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn customers(customers: &[Customer], current: Option<&str>) -> String {
    if customers.is_empty() {
        return "No customers.".to_string();
    }

    customers
        .iter()
        .map(|c| {
            let marker = if current == Some(c.id.as_str()) { "*" } else { " " };
            if c.email.is_empty() {
                format!(" {} [{}] {}", marker, c.id, c.name)
            } else {
                format!(" {} [{}] {} <{}>", marker, c.id, c.name, c.email)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{CartBuilder, Catalog, Category, Money, OrderAssembler};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: "LAMP".to_string(),
                name: "Desk Lamp".to_string(),
                description: "LED desk lamp".to_string(),
                tags: vec!["lamp".to_string()],
                category: Category::Home,
                price: Money::from_cents(2450),
                stock: 6,
            },
            Product {
                id: "BULB".to_string(),
                name: "Lamp Bulb".to_string(),
                description: String::new(),
                tags: Vec::new(),
                category: Category::Home,
                price: Money::from_cents(399),
                stock: 30,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_hits_respects_limit() {
        let catalog = catalog();
        let found = catalog.query().search("lamp").unwrap();
        assert_eq!(found.len(), 2);

        let text = hits(&found, 1);
        assert!(text.starts_with("  1. [LAMP] Desk Lamp (home) $24.50, 6 in stock  score 3.00"));
        assert!(text.ends_with("... 1 more"));
        assert_eq!(hits(&[], 5), "No matching products.");
    }

    #[test]
    fn test_cart_shows_totals() {
        let catalog = catalog();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("BULB", 4).unwrap();

        let text = cart(builder.cart());
        assert!(text.contains("BULB"));
        assert!(text.contains("$15.96"));
        assert!(text.ends_with("1 products, 4 items, total $15.96"));
    }

    #[test]
    fn test_order_lists_snapshots() {
        let catalog = catalog();
        let mut builder = CartBuilder::new(&catalog);
        builder.add("LAMP", 2).unwrap();
        builder.finish().unwrap();
        let cart = builder.into_cart().unwrap();
        let customer = Customer {
            id: "C1".to_string(),
            name: "Ada".to_string(),
            email: String::new(),
            address: String::new(),
        };
        let placed = OrderAssembler.assemble(&customer, &cart).unwrap();

        let text = order(&placed);
        assert!(text.contains("for Ada (processing)"));
        assert!(text.contains("Desk Lamp"));
        assert!(text.ends_with("Total: $49.00"));

        assert!(order_list(&[placed]).contains("$49.00"));
        assert_eq!(order_list(&[]), "No orders yet.");
    }

    #[test]
    fn test_customers_marks_current() {
        let list = vec![
            Customer {
                id: "C1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                address: String::new(),
            },
            Customer {
                id: "C2".to_string(),
                name: "Grace".to_string(),
                email: String::new(),
                address: String::new(),
            },
        ];
        let text = customers(&list, Some("C2"));
        assert_eq!(text, "   [C1] Ada <ada@example.com>\n * [C2] Grace");
    }
}
