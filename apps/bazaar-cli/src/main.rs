//! # Bazaar CLI Entry Point
//!
//! ```text
//! bazaar-cli                           interactive session
//! bazaar-cli shop --script run.txt     replay a recorded session
//! bazaar-cli orders [--id ORDER-...]   order history
//! bazaar-cli init-config [--force]     write a config file
//! ```
//!
//! Exit status is 0 on success and 1 on any error that ends the program.

use std::process::ExitCode;

use bazaar_cli::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    bazaar_cli::init_tracing();

    match bazaar_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
