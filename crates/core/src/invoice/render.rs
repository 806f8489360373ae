//! Plain-text rendering of an invoice for display and printing.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::format_inr;

use super::types::{Invoice, TaxConfiguration, TaxType};

const RULE_WIDTH: usize = 72;

/// Renders an invoice as printable text.
#[must_use]
pub fn render(invoice: &Invoice) -> String {
    Printable(invoice).to_string()
}

/// Formats a date as `March 5, 2026`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats a percent without trailing zeros (`9`, `12.5`).
fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}

struct Printable<'a>(&'a Invoice);

impl fmt::Display for Printable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.0;
        let body = &invoice.body;
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "{:<40}{:>32}", "INVOICE", body.invoice_number)?;
        writeln!(f, "Date: {}", format_date(invoice.created_at.date_naive()))?;
        writeln!(f, "Due Date: {}", format_date(body.due_date))?;
        writeln!(f, "HSN/SAC: {}", body.tariff_code)?;
        writeln!(f)?;

        writeln!(f, "From:")?;
        writeln!(f, "  {}", body.company.name)?;
        writeln!(f, "  {}", body.company.address)?;
        writeln!(f, "  {}", body.company.email)?;
        if !body.company.phone.is_empty() {
            writeln!(f, "  {}", body.company.phone)?;
        }
        writeln!(f)?;

        writeln!(f, "Bill To:")?;
        writeln!(f, "  {}", body.client.name)?;
        if !body.client.company.is_empty() {
            writeln!(f, "  {}", body.client.company)?;
        }
        writeln!(f, "  {}", body.client.address)?;
        writeln!(f, "  {}", body.client.email)?;
        if let Some(phone) = body.client.phone.as_deref().filter(|p| !p.is_empty()) {
            writeln!(f, "  {phone}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<4}{:<32}{:>6}{:>15}{:>15}",
            "#", "Description", "Qty", "Unit Price", "Amount"
        )?;
        writeln!(f, "{rule}")?;
        for (index, item) in body.services.iter().enumerate() {
            writeln!(
                f,
                "{:<4}{:<32}{:>6}{:>15}{:>15}",
                index + 1,
                item.description,
                item.quantity,
                format_inr(item.unit_price),
                format_inr(item.total)
            )?;
        }
        writeln!(f, "{rule}")?;

        summary_line(f, "Subtotal:", &format_inr(body.subtotal))?;
        if body.discount_rate > Decimal::ZERO {
            summary_line(
                f,
                &format!("Discount ({}%):", format_rate(body.discount_rate)),
                &format!("-{}", format_inr(body.discount_amount)),
            )?;
        }
        if !body.tax_breakdown.total_tax_amount.is_zero() {
            match &body.tax {
                TaxConfiguration::Flat { tax_rate } => summary_line(
                    f,
                    &format!("Tax ({}%):", format_rate(*tax_rate)),
                    &format_inr(body.tax_breakdown.total_tax_amount),
                )?,
                TaxConfiguration::Split {
                    tax_type: TaxType::Interstate,
                    igst_rate,
                    ..
                } => summary_line(
                    f,
                    &format!("IGST ({}%):", format_rate(*igst_rate)),
                    &format_inr(body.tax_breakdown.igst_amount),
                )?,
                TaxConfiguration::Split {
                    tax_type: TaxType::Intrastate,
                    cgst_rate,
                    sgst_rate,
                    ..
                } => {
                    summary_line(
                        f,
                        &format!("CGST ({}%):", format_rate(*cgst_rate)),
                        &format_inr(body.tax_breakdown.cgst_amount),
                    )?;
                    summary_line(
                        f,
                        &format!("SGST ({}%):", format_rate(*sgst_rate)),
                        &format_inr(body.tax_breakdown.sgst_amount),
                    )?;
                }
            }
        }
        summary_line(f, "Total:", &format_inr(body.total))?;

        if let (Some(token), Some(remaining)) = (body.token_amount, body.remaining_amount) {
            writeln!(f)?;
            summary_line(f, "Token Amount (Payable Today):", &format_inr(token))?;
            summary_line(
                f,
                &format!("Remaining Amount (Due by {}):", format_date(body.due_date)),
                &format_inr(remaining),
            )?;
        }

        Ok(())
    }
}

fn summary_line(f: &mut fmt::Formatter<'_>, label: &str, amount: &str) -> fmt::Result {
    writeln!(f, "{label:>54}{amount:>18}")
}
