//! Field-level validation of invoice form input.
//!
//! The calculator trusts its inputs; this is the separate check a caller
//! runs before computing, persisting, or exporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::types::{Client, Company, InvoiceFormInput};

/// Length of an HSN/SAC tariff code.
pub const TARIFF_CODE_LEN: usize = 6;

/// Largest line total or token amount accepted, in whole rupees.
///
/// Keeps every derived amount far inside `Decimal`'s range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// A single problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `services[1].quantity`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Validates form input, returning every problem found (not just the first).
#[must_use]
pub fn validate(form: &InvoiceFormInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(&form.invoice_number, "invoiceNumber", &mut errors);
    validate_company(&form.company, &mut errors);
    validate_client(&form.client, &mut errors);

    if form.services.is_empty() {
        errors.push(FieldError::new("services", "must contain at least one service"));
    }
    for (index, service) in form.services.iter().enumerate() {
        require(
            &service.description,
            &format!("services[{index}].description"),
            &mut errors,
        );
        if service.quantity < 1 {
            errors.push(FieldError::new(
                format!("services[{index}].quantity"),
                "must be at least 1",
            ));
        }
        if service.unit_price < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("services[{index}].unitPrice"),
                "must not be negative",
            ));
        }
        let line_total = Decimal::from(service.quantity).checked_mul(service.unit_price);
        if line_total.is_none_or(exceeds_ceiling) {
            errors.push(FieldError::new(
                format!("services[{index}]"),
                format!("line total must not exceed {MAX_AMOUNT}"),
            ));
        }
    }

    for (field, rate) in form.tax.rates() {
        check_percent(rate, &format!("tax.{field}"), &mut errors);
    }
    check_percent(form.discount_rate, "discountRate", &mut errors);

    if let Some(amount) = form.token_amount {
        if amount < Decimal::ZERO {
            errors.push(FieldError::new("tokenAmount", "must not be negative"));
        } else if exceeds_ceiling(amount) {
            errors.push(FieldError::new(
                "tokenAmount",
                format!("must not exceed {MAX_AMOUNT}"),
            ));
        }
    }

    if !is_tariff_code(&form.tariff_code) {
        errors.push(FieldError::new(
            "tariffCode",
            format!("must be exactly {TARIFF_CODE_LEN} digits"),
        ));
    }

    errors
}

impl InvoiceFormInput {
    /// Returns the input unchanged if it passes validation.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::Validation` carrying every field problem.
    pub fn validated(&self) -> Result<&Self, InvoiceError> {
        let errors = validate(self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(InvoiceError::Validation(errors))
        }
    }
}

/// Returns true if `code` is exactly six ASCII digits.
#[must_use]
pub fn is_tariff_code(code: &str) -> bool {
    code.len() == TARIFF_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

fn validate_company(company: &Company, errors: &mut Vec<FieldError>) {
    require(&company.name, "company.name", errors);
    require(&company.address, "company.address", errors);
    check_email(&company.email, "company.email", errors);
}

fn validate_client(client: &Client, errors: &mut Vec<FieldError>) {
    require(&client.name, "client.name", errors);
    require(&client.address, "client.address", errors);
    check_email(&client.email, "client.email", errors);
}

fn require(value: &str, field: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

fn check_email(value: &str, field: &str, errors: &mut Vec<FieldError>) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return;
    }

    let well_formed = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if !well_formed {
        errors.push(FieldError::new(field, "is not a valid email address"));
    }
}

fn exceeds_ceiling(amount: Decimal) -> bool {
    amount > Decimal::from(MAX_AMOUNT)
}

fn check_percent(rate: Decimal, field: &str, errors: &mut Vec<FieldError>) {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        errors.push(FieldError::new(field, "must be between 0 and 100"));
    }
}
