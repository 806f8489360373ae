//! Month-scoped sequential invoice numbers.
//!
//! - `generator` - the scan-based contract: next number from stored invoices
//! - `sequence` - parsed numbers and an explicit per-month counter

pub mod generator;
pub mod sequence;

#[cfg(test)]
mod generator_props;

pub use generator::{
    format_number, month_name, next_invoice_number, next_number_from, parse_sequence,
};
pub use sequence::{InvoiceNumber, MonthlySequence};
