//! Subcommand handlers.

use std::path::Path;

use chrono::{Local, NaiveDate, Utc};
use serde_json::Value;
use tally_core::invoice::{Invoice, InvoiceSummary, render, summarize};
use tally_shared::types::{InvoiceId, format_inr};
use tally_shared::{AppConfig, AppError, AppResult};
use tally_store::{InvoiceStore, StoreError};
use tracing::{debug, info};

use crate::args::Command;
use crate::form;

/// Runs one subcommand against the store, printing its result to stdout.
pub async fn run(command: Command, config: &AppConfig, store: &InvoiceStore) -> AppResult<()> {
    let today = Local::now().date_naive();
    debug!(?command, %today, "running command");

    match command {
        Command::NextNumber => {
            println!("{}", store.next_invoice_number(&today).await?);
        }
        Command::Create { form: path } => {
            let number = store.next_invoice_number(&today).await?;
            let template = form::template(config, today, &number)?;
            let input = form::complete(read_form(&path)?, &template)?;
            let invoice = store.create(&input, Utc::now()).await?;
            print!("{}", render(&invoice));
        }
        Command::Edit { id, form: path } => {
            let existing = find(store, id).await?;
            let template = form::template(config, today, existing.invoice_number())?;
            let input = form::complete(read_form(&path)?, &template)?;
            let invoice = store.update(id, &input).await?;
            print!("{}", render(&invoice));
        }
        Command::List => list(store).await?,
        Command::Show { id } => {
            print!("{}", render(&find(store, id).await?));
        }
        Command::Delete { id } => {
            if store.delete(id).await? {
                println!("Deleted invoice {id}");
            } else {
                info!(invoice_id = %id, "nothing to delete");
                println!("No invoice {id}");
            }
        }
        Command::Template => {
            let number = store.next_invoice_number(&today).await?;
            print_template(config, today, &number)?;
        }
    }
    Ok(())
}

async fn find(store: &InvoiceStore, id: InvoiceId) -> AppResult<Invoice> {
    store
        .get(id)
        .await?
        .ok_or_else(|| StoreError::not_found(id).into())
}

async fn list(store: &InvoiceStore) -> AppResult<()> {
    let invoices = store.list().await?;
    for row in invoices.iter().map(InvoiceSummary::from) {
        println!(
            "{:<22} {:<28} {:<12} {:>18}  {}",
            row.invoice_number,
            row.client_name,
            row.due_date,
            format_inr(row.total),
            row.id
        );
    }

    let totals = summarize(&invoices);
    println!();
    println!("{} invoice(s) total", totals.count);
    if totals.count > 0 {
        println!(
            "Billed {}, collected {}, outstanding {}",
            format_inr(totals.billed),
            format_inr(totals.collected),
            format_inr(totals.outstanding)
        );
    }
    Ok(())
}

fn print_template(config: &AppConfig, today: NaiveDate, number: &str) -> AppResult<()> {
    let skeleton = form::template(config, today, number)?;
    let text = serde_json::to_string_pretty(&skeleton)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn read_form(path: &Path) -> AppResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(format!("{}", path.display())),
        _ => AppError::Internal(format!("cannot read {}: {e}", path.display())),
    })?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::Serialization(format!("{}: {e}", path.display())))
}
