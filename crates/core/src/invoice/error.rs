//! Invoice error types.

use tally_shared::AppError;
use thiserror::Error;

use super::validation::FieldError;

/// Errors that can occur when preparing invoices.
///
/// The calculator itself never fails; these come from validation and from
/// parsing configuration or invoice-number text.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Form input failed one or more field checks.
    #[error("Invoice input is invalid: {}", join_errors(.0))]
    Validation(Vec<FieldError>),

    /// Unknown GST jurisdiction.
    #[error("Unknown tax type '{0}', expected 'interstate' or 'intrastate'")]
    InvalidTaxType(String),

    /// Text is not a well-formed `INV - {Month} - {NN}` number.
    #[error("Malformed invoice number: {0}")]
    InvalidInvoiceNumber(String),

    /// Every sequence value of the month has been issued.
    #[error("No invoice numbers left for {0}")]
    SequenceExhausted(String),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl InvoiceError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVALID_INVOICE_INPUT",
            Self::InvalidTaxType(_) => "INVALID_TAX_TYPE",
            Self::InvalidInvoiceNumber(_) => "INVALID_INVOICE_NUMBER",
            Self::SequenceExhausted(_) => "SEQUENCE_EXHAUSTED",
        }
    }

    /// Field-level problems, empty for non-validation errors.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::SequenceExhausted(_) => Self::Internal(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
