//! List projections and collection totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::InvoiceId;

use super::types::Invoice;

/// One row of an invoice listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    /// Invoice identity.
    pub id: InvoiceId,
    /// Business-facing number.
    pub invoice_number: String,
    /// Billed client's name.
    pub client_name: String,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Grand total.
    pub total: Decimal,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.body.invoice_number.clone(),
            client_name: invoice.body.client.name.clone(),
            due_date: invoice.body.due_date,
            total: invoice.body.total,
        }
    }
}

/// Aggregate amounts across a set of invoices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Number of invoices.
    pub count: usize,
    /// Sum of grand totals.
    pub billed: Decimal,
    /// Sum of token amounts collected upfront.
    pub collected: Decimal,
    /// Sum still due: the remaining amount, or the full total without a token.
    pub outstanding: Decimal,
}

/// Totals a set of invoices.
#[must_use]
pub fn summarize(invoices: &[Invoice]) -> Totals {
    invoices.iter().fold(Totals::default(), |mut totals, invoice| {
        let body = &invoice.body;
        totals.count += 1;
        totals.billed += body.total;
        totals.collected += body.token_amount.unwrap_or(Decimal::ZERO);
        totals.outstanding += body.remaining_amount.unwrap_or(body.total);
        totals
    })
}
