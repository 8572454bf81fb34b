//! # Shop Driver
//!
//! Runs one shopping session end to end.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. LOAD        catalog + customers          (LoadFailed → abort)      │
//! │                                                                         │
//! │  2. CUSTOMER    --customer ID, or prompt until a known id is typed     │
//! │                                                                         │
//! │  3. SHOP        search / category / price / add / cart ... done        │
//! │                 every error is printed and the next line is read;      │
//! │                 the cart survives                                      │
//! │                                                                         │
//! │  4. COMMIT      OrderStore::append(order)                              │
//! │                 PersistenceFailed → offer retry of the same order      │
//! │                                                                         │
//! │  5. STOCK       Catalog::reserve(order), then products file rewritten  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use bazaar_core::{Customer, CustomerDirectory, Order, ShopSession};
use bazaar_store::Store;
use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use crate::command::{parse_line, Command, HELP};
use crate::error::{CliError, CliResult};
use crate::input::Input;
use crate::render;

const PROMPT: &str = "bazaar> ";
const CUSTOMER_PROMPT: &str = "customer> ";
const RETRY_PROMPT: &str = "retry> ";

/// Session settings resolved from configuration and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopOptions {
    pub customer_id: Option<String>,
    pub max_results: usize,
    pub max_commit_attempts: u32,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopOutcome {
    /// The order is durably stored.
    Placed(Order),
    /// Input ended or the operator quit before ordering.
    Abandoned,
}

/// Runs a full session against `store`.
pub async fn run_shop<R, W>(
    store: &Store,
    options: &ShopOptions,
    input: &mut Input<R>,
    out: &mut W,
) -> CliResult<ShopOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut catalog = store.load_catalog().await?;
    let customers = store.load_customers().await?;

    let Some(customer) = select_customer(&customers, options, input, out).await? else {
        info!("Session ended before a customer was chosen");
        return Ok(ShopOutcome::Abandoned);
    };

    let order = {
        let mut session = ShopSession::new(&catalog, customer);
        match shop(&mut session, &customers, options, input, out).await? {
            Some(order) => order,
            None => {
                info!(customer_id = %customer.id, "Session abandoned");
                return Ok(ShopOutcome::Abandoned);
            }
        }
    };

    commit(store, &order, options.max_commit_attempts, input, out).await?;
    writeln!(out, "Order {} placed.", order.id)?;

    catalog.reserve(&order)?;
    if let Err(err) = store.save_catalog(&catalog).await {
        warn!(order_id = %order.id, error = %err, "Order placed but stock file not updated");
        writeln!(out, "Warning: stock levels were not saved: {}", err)?;
    }

    Ok(ShopOutcome::Placed(order))
}

async fn select_customer<'c, R, W>(
    customers: &'c CustomerDirectory,
    options: &ShopOptions,
    input: &mut Input<R>,
    out: &mut W,
) -> CliResult<Option<&'c Customer>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(id) = &options.customer_id {
        return Ok(Some(customers.find(id)?));
    }

    writeln!(out, "Customers:\n{}", render::customers(customers.all(), None))?;
    writeln!(out, "Type a customer id, or 'quit'.")?;

    while let Some(line) = input.next_line(out, CUSTOMER_PROMPT).await? {
        match line.as_str() {
            "" => continue,
            "quit" | "exit" | "q" => return Ok(None),
            "customers" => {
                writeln!(out, "{}", render::customers(customers.all(), None))?;
            }
            id => match customers.find(id) {
                Ok(customer) => return Ok(Some(customer)),
                Err(err) => writeln!(out, "{}", CliError::from(err))?,
            },
        }
    }

    Ok(None)
}

/// The command loop. Returns the assembled order on `done`.
async fn shop<R, W>(
    session: &mut ShopSession<'_>,
    customers: &CustomerDirectory,
    options: &ShopOptions,
    input: &mut Input<R>,
    out: &mut W,
) -> CliResult<Option<Order>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "Shopping as {}. Type 'help' for commands.",
        session.customer().name
    )?;

    while let Some(line) = input.next_line(out, PROMPT).await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", CliError::from(err))?;
                continue;
            }
        };

        let reply = match command {
            Command::Empty => continue,
            Command::Quit => return Ok(None),
            Command::Help => Ok(HELP.to_string()),
            Command::Search(text) => session
                .search(&text)
                .map(|found| render::hits(&found, options.max_results)),
            Command::Category(name) => Ok(render::products(&session.filter_category(&name))),
            Command::Price { min, max } => session
                .filter_price(min, max)
                .map(|found| render::products(&found)),
            Command::Add {
                product_id,
                quantity,
            } => session.add_to_cart(&product_id, quantity).map(|line| {
                format!(
                    "Added {} x {} ({} in cart).",
                    quantity, line.product.name, line.quantity
                )
            }),
            Command::Cart => Ok(render::cart(session.cart())),
            Command::Customers => Ok(render::customers(
                customers.all(),
                Some(session.customer().id.as_str()),
            )),
            Command::Done => match session.finish_cart() {
                Ok(order) => {
                    writeln!(out, "{}", render::order(&order))?;
                    return Ok(Some(order));
                }
                Err(err) => Err(err),
            },
        };

        match reply {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(err) => writeln!(out, "{}", CliError::from(err))?,
        }
    }

    Ok(None)
}

/// Appends `order`, offering a retry after each retryable failure.
///
/// The same assembled order is written on every attempt. A blank line
/// retries; `abort` or end of input gives up.
async fn commit<R, W>(
    store: &Store,
    order: &Order,
    max_attempts: u32,
    input: &mut Input<R>,
    out: &mut W,
) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut attempt = 1;
    loop {
        let err = match store.orders().append(order).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        if !err.is_retryable() || attempt >= max_attempts {
            return Err(err.into());
        }

        warn!(order_id = %order.id, attempt, max_attempts, error = %err, "Order append failed");
        writeln!(
            out,
            "Could not save order {} (attempt {} of {}): {}",
            order.id, attempt, max_attempts, err
        )?;
        writeln!(out, "Press enter to retry, or type 'abort'.")?;

        match input.next_line(out, RETRY_PROMPT).await? {
            Some(answer) if !answer.eq_ignore_ascii_case("abort") => attempt += 1,
            _ => return Err(err.into()),
        }
    }
}
