//! # Bazaar CLI
//!
//! Terminal front end for catalog search and ordering.
//!
//! ## Module Organization
//! ```text
//! bazaar_cli/
//! ├── lib.rs      ◄─── You are here (tracing setup & dispatch)
//! ├── cli.rs      ◄─── clap argument definitions
//! ├── config.rs   ◄─── TOML / env configuration
//! ├── command.rs  ◄─── Session command parser
//! ├── input.rs    ◄─── Prompted or scripted line input
//! ├── shop.rs     ◄─── Session driver and order commit
//! ├── render.rs   ◄─── Plain-text views
//! └── error.rs    ◄─── Operator-facing error codes
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, `RUST_LOG` aware)
//! 3. Load config: defaults → file → environment → flags, then validate
//! 4. Dispatch: shop session, order listing, or config file creation

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod shop;

use std::io::Write;

use bazaar_store::Store;
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Action, Cli};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::input::{Input, InputMode};
use crate::shop::{run_shop, ShopOptions, ShopOutcome};

/// Installs the global subscriber.
///
/// Logs go to stderr so session output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the parsed command line to completion.
pub async fn run(cli: Cli) -> CliResult<()> {
    let action = cli.action();

    // init-config may name a file that does not exist yet
    let mut config = match (&action, cli.config.as_deref()) {
        (Action::InitConfig { .. }, Some(path)) if !path.exists() => {
            let mut config = AppConfig::default();
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        (_, path) => AppConfig::load(path)?,
    };
    cli.apply_to(&mut config);
    config.validate()?;
    debug!(?config, "Configuration resolved");

    let mut out = std::io::stdout();

    match action {
        Action::Shop => {
            let store = Store::new(config.store_config());
            let options = ShopOptions {
                customer_id: cli.customer.clone(),
                max_results: config.search.max_results,
                max_commit_attempts: config.session.max_commit_attempts,
            };

            let outcome = match &cli.script {
                Some(path) => {
                    info!(?path, "Running scripted session");
                    let file = tokio::fs::File::open(path).await.map_err(|e| {
                        CliError::new(
                            ErrorCode::LoadFailed,
                            format!("{}: {}", path.display(), e),
                        )
                    })?;
                    let mut input = Input::new(BufReader::new(file), InputMode::Scripted);
                    run_shop(&store, &options, &mut input, &mut out).await?
                }
                None => {
                    let mut input = Input::stdin();
                    run_shop(&store, &options, &mut input, &mut out).await?
                }
            };

            if outcome == ShopOutcome::Abandoned {
                writeln!(out, "No order placed.")?;
            }
        }

        Action::Orders { id } => {
            let store = Store::new(config.store_config());
            match id {
                Some(id) => {
                    let order = store
                        .orders()
                        .find(&id)
                        .await?
                        .ok_or_else(|| CliError::not_found("Order", &id))?;
                    writeln!(out, "{}", render::order(&order))?;
                }
                None => {
                    let orders = store.orders().load_all().await?;
                    writeln!(out, "{}", render::order_list(&orders))?;
                }
            }
        }

        Action::InitConfig { force } => {
            let path = match cli.config.clone().or_else(AppConfig::default_config_path) {
                Some(path) => path,
                None => return Err(CliError::config("No config path available")),
            };
            if path.exists() && !force {
                return Err(CliError::config(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            let written = config.save(Some(&path))?;
            writeln!(out, "Wrote {}", written.display())?;
        }
    }

    Ok(())
}
