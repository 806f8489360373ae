//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tally_shared::types::InvoiceId;

/// `EX_USAGE` from sysexits.h.
pub const USAGE_EXIT: u8 = 64;

/// Create, number and print invoices kept in the local store.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the next invoice number for today
    NextNumber,
    /// Create an invoice from a form file
    Create {
        /// JSON form file; missing fields take configured defaults
        form: PathBuf,
    },
    /// Recompute an invoice from an edited form
    Edit {
        /// Invoice id
        id: InvoiceId,
        /// JSON form file
        form: PathBuf,
    },
    /// List stored invoices
    List,
    /// Print one invoice
    Show {
        /// Invoice id
        id: InvoiceId,
    },
    /// Delete an invoice
    Delete {
        /// Invoice id
        id: InvoiceId,
    },
    /// Print a form skeleton with configured defaults
    Template,
}

/// Exit status for an argument error: 0 after help or version output,
/// [`USAGE_EXIT`] otherwise.
pub fn exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { USAGE_EXIT } else { 0 }
}
