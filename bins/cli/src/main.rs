//! Tally command-line interface
//!
//! Creates, numbers, lists and prints invoices kept in the local store.

mod args;
mod commands;
mod form;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_shared::{AppConfig, AppError, AppResult};
use tally_store::{InvoiceStore, StoreProvider};

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for invoice output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tally_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(args::exit_status(&err));
        }
    };

    match start(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("error: {err}");
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn start(command: Command) -> AppResult<()> {
    let config = AppConfig::load()?;
    let provider = StoreProvider::from(&config.storage);
    let store = InvoiceStore::open(&provider)?;
    info!(
        provider = store.provider_name(),
        root = %config.storage.root.display(),
        "Invoice store ready"
    );

    commands::run(command, &config, &store).await
}

/// Process exit status for a failed command.
fn exit_status(err: &AppError) -> u8 {
    u8::try_from(err.exit_code()).unwrap_or(1)
}
