//! Store error types.

use tally_core::invoice::InvoiceError;
use tally_shared::AppError;
use tally_shared::types::InvoiceId;
use thiserror::Error;

/// Invoice store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No invoice with this id.
    #[error("invoice not found: {id}")]
    NotFound {
        /// Requested invoice id.
        id: InvoiceId,
    },

    /// Form input was rejected before saving.
    #[error(transparent)]
    Invalid(#[from] InvoiceError),

    /// The stored document is not valid invoice JSON.
    #[error("invoice document is corrupt: {0}")]
    Corrupt(String),

    /// Backend configuration error.
    #[error("store configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: InvoiceId) -> Self {
        Self::NotFound { id }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Invalid(inner) => inner.into(),
            StoreError::Corrupt(_) => Self::Serialization(err.to_string()),
            StoreError::Configuration(_) => Self::Configuration(err.to_string()),
            StoreError::Operation(_) => Self::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::invoice::FieldError;

    #[test]
    fn test_display() {
        let id = InvoiceId::new();
        assert_eq!(
            StoreError::not_found(id).to_string(),
            format!("invoice not found: {id}")
        );
        assert_eq!(
            StoreError::configuration("bad root").to_string(),
            "store configuration error: bad root"
        );
    }

    #[test]
    fn test_invalid_is_transparent() {
        let err = StoreError::from(InvoiceError::Validation(vec![FieldError::new(
            "client.name",
            "is required",
        )]));
        assert_eq!(
            err.to_string(),
            "Invoice input is invalid: client.name is required"
        );
    }

    #[test]
    fn test_into_app_error() {
        assert!(matches!(
            AppError::from(StoreError::not_found(InvoiceId::new())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Corrupt("eof".into())),
            AppError::Serialization(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Operation("io".into())),
            AppError::Storage(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Invalid(InvoiceError::InvalidTaxType("x".into()))),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(StoreError::from(err), StoreError::Corrupt(_)));
    }
}
