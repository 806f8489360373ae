//! Invoice amount calculation.
//!
//! Pure, deterministic functions: no clock reads, no I/O, no rounding.
//! Out-of-range input (rates above 100, discounts larger than the subtotal)
//! is computed as given; see [`super::validation`] for the checks a caller
//! should run first.
//!
//! Input that passes validation keeps every amount below
//! [`super::validation::MAX_AMOUNT`] per line, far from `Decimal`'s limit.
//! Unvalidated amounts near `Decimal::MAX` can still overflow.

use rust_decimal::Decimal;

use super::types::{
    InvoiceBody, InvoiceFormInput, LineItem, LineItemInput, TaxBreakdown, TaxConfiguration,
    TaxType,
};

/// Returns `amount × rate / 100`.
///
/// The rate is scaled first, so the product never exceeds `amount` for
/// rates up to 100.
#[must_use]
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * (rate / Decimal::ONE_HUNDRED)
}

/// Returns `quantity × unit_price`.
#[must_use]
pub fn compute_line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Sums line totals. Empty input yields zero.
#[must_use]
pub fn compute_subtotal(line_items: &[LineItem]) -> Decimal {
    line_items.iter().map(|item| item.total).sum()
}

/// Computes the tax amounts for the active tax path.
#[must_use]
pub fn compute_tax(subtotal: Decimal, tax: &TaxConfiguration) -> TaxBreakdown {
    match tax {
        TaxConfiguration::Flat { tax_rate } => TaxBreakdown {
            total_tax_amount: percent_of(subtotal, *tax_rate),
            ..TaxBreakdown::default()
        },
        TaxConfiguration::Split {
            tax_type: TaxType::Interstate,
            igst_rate,
            ..
        } => {
            let igst_amount = percent_of(subtotal, *igst_rate);
            TaxBreakdown {
                igst_amount,
                total_tax_amount: igst_amount,
                ..TaxBreakdown::default()
            }
        }
        TaxConfiguration::Split {
            tax_type: TaxType::Intrastate,
            cgst_rate,
            sgst_rate,
            ..
        } => {
            let cgst_amount = percent_of(subtotal, *cgst_rate);
            let sgst_amount = percent_of(subtotal, *sgst_rate);
            TaxBreakdown {
                cgst_amount,
                sgst_amount,
                igst_amount: Decimal::ZERO,
                total_tax_amount: cgst_amount + sgst_amount,
            }
        }
    }
}

/// Returns `subtotal × discount_rate / 100`. Rates above 100 are accepted.
#[must_use]
pub fn compute_discount(subtotal: Decimal, discount_rate: Decimal) -> Decimal {
    percent_of(subtotal, discount_rate)
}

/// Returns `subtotal + total_tax − discount`. Not floored at zero.
#[must_use]
pub fn compute_total(subtotal: Decimal, total_tax: Decimal, discount: Decimal) -> Decimal {
    subtotal + total_tax - discount
}

/// Processes form services into line items with `service-{n}` ids.
#[must_use]
pub fn process_line_items(services: &[LineItemInput]) -> Vec<LineItem> {
    services
        .iter()
        .enumerate()
        .map(|(index, service)| LineItem {
            id: format!("service-{}", index + 1),
            description: service.description.clone(),
            quantity: service.quantity,
            unit_price: service.unit_price,
            total: compute_line_total(service.quantity, service.unit_price),
        })
        .collect()
}

/// Derives every invoice field except identity and creation time.
///
/// Runs line totals, subtotal, tax, discount, total and remaining amount in
/// that order. Identical input always yields identical output.
#[must_use]
pub fn compose_invoice_body(form: &InvoiceFormInput) -> InvoiceBody {
    let services = process_line_items(&form.services);
    let subtotal = compute_subtotal(&services);
    let tax_breakdown = compute_tax(subtotal, &form.tax);
    let discount_amount = compute_discount(subtotal, form.discount_rate);
    let total = compute_total(subtotal, tax_breakdown.total_tax_amount, discount_amount);
    let remaining_amount = form.token_amount.map(|token| total - token);

    InvoiceBody {
        invoice_number: form.invoice_number.clone(),
        company: form.company.clone(),
        client: form.client.clone(),
        services,
        subtotal,
        tax: form.tax.clone(),
        tax_breakdown,
        discount_rate: form.discount_rate,
        discount_amount,
        total,
        token_amount: form.token_amount,
        remaining_amount,
        due_date: form.due_date,
        tariff_code: form.tariff_code.clone(),
    }
}
