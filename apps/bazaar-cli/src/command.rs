//! # Session Command Language
//!
//! One command per line; the first word is the verb.
//!
//! ```text
//! search <text...>          ranked fuzzy search
//! category <name>           products in a category
//! price <min> <max>         products priced in [min, max], e.g. price 10 49.99
//! add <product-id> <qty>    add to cart
//! cart                      show the cart
//! done                      finish the cart and place the order
//! customers                 list customers
//! help                      this list
//! quit                      leave without ordering
//! ```

use bazaar_core::{Money, ValidationError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  search <text>           ranked search over name, description and tags
  category <name>         list products in a category
  price <min> <max>       list products priced between min and max (inclusive)
  add <product-id> <qty>  add a product to the cart
  cart                    show the cart
  done                    finish the cart and place the order
  customers               list customers
  help                    show this help
  quit                    leave without ordering";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(String),
    Price { min: Money, max: Money },
    Add { product_id: String, quantity: u32 },
    Cart,
    Done,
    Customers,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

/// A line that is not a well-formed command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Quantity must be a whole number, got '{0}'")]
    InvalidQuantity(String),

    #[error("{0}")]
    InvalidPrice(#[from] ValidationError),
}

/// Parses one input line.
///
/// Search text and category names are passed through as typed; blank
/// search text reaches the core, which reports it as an empty query.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match verb.to_lowercase().as_str() {
        "" => Ok(Command::Empty),
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "category" | "c" => match args.as_slice() {
            [name] => Ok(Command::Category(name.to_string())),
            _ => Err(CommandError::Usage("category <name>")),
        },
        "price" | "p" => match args.as_slice() {
            [min, max] => Ok(Command::Price {
                min: min.parse()?,
                max: max.parse()?,
            }),
            _ => Err(CommandError::Usage("price <min> <max>")),
        },
        "add" | "a" => match args.as_slice() {
            [product_id, quantity] => Ok(Command::Add {
                product_id: product_id.to_string(),
                quantity: quantity
                    .parse()
                    .map_err(|_| CommandError::InvalidQuantity(quantity.to_string()))?,
            }),
            _ => Err(CommandError::Usage("add <product-id> <qty>")),
        },
        "cart" => Ok(Command::Cart),
        "done" | "checkout" => Ok(Command::Done),
        "customers" => Ok(Command::Customers),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}
