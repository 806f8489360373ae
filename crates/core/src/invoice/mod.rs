//! Invoice records and the logic that derives them.
//!
//! This module implements the invoice calculator:
//! - Domain types for form input, derived bodies, and persisted invoices
//! - Line totals, subtotal, jurisdiction-aware GST split, discount, total
//! - Field-level validation of form input
//! - Plain-text rendering and list summaries

pub mod calculation;
pub mod error;
pub mod render;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod calculation_props;

pub use calculation::{
    compose_invoice_body, compute_discount, compute_line_total, compute_subtotal, compute_tax,
    compute_total, percent_of, process_line_items,
};
pub use error::InvoiceError;
pub use render::{format_date, render};
pub use summary::{InvoiceSummary, Totals, summarize};
pub use types::{
    Client, Company, Invoice, InvoiceBody, InvoiceFormInput, LineItem, LineItemInput,
    TaxBreakdown, TaxConfiguration, TaxType,
};
pub use validation::{FieldError, is_tariff_code, validate};
