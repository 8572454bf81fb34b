//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Bazaar - search a product catalog and place orders
#[derive(Debug, Parser)]
#[command(name = "bazaar-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Products file (JSON array)
    #[arg(long, global = true)]
    pub products: Option<PathBuf>,

    /// Customers file (JSON array)
    #[arg(long, global = true)]
    pub customers: Option<PathBuf>,

    /// Order history file (JSON Lines)
    #[arg(long, global = true)]
    pub orders: Option<PathBuf>,

    /// Shop as this customer instead of prompting
    #[arg(long, global = true)]
    pub customer: Option<String>,

    /// Read session commands from a file instead of the terminal
    #[arg(long, global = true)]
    pub script: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Action>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Start a shopping session (default)
    Shop,

    /// Show placed orders
    Orders {
        /// Show a single order in full
        #[arg(long)]
        id: Option<String>,
    },

    /// Write the current configuration as a config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Flag overrides, applied after file and environment.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(path) = &self.products {
            config.data.products_path = path.clone();
        }
        if let Some(path) = &self.customers {
            config.data.customers_path = path.clone();
        }
        if let Some(path) = &self.orders {
            config.data.orders_path = path.clone();
        }
    }

    /// The chosen action; a bare invocation starts a session.
    pub fn action(&self) -> Action {
        self.command.clone().unwrap_or(Action::Shop)
    }
}
