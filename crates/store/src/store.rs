//! Invoice store over an OpenDAL operator.

use chrono::{DateTime, Datelike, Utc};
use opendal::{ErrorKind, Operator, services};
use tally_core::invoice::{Invoice, InvoiceFormInput, compose_invoice_body};
use tally_core::numbering::next_invoice_number;
use tally_shared::types::InvoiceId;
use tracing::{debug, info, warn};

use crate::config::StoreProvider;
use crate::error::StoreError;

/// Key of the JSON document holding every invoice.
pub const DOCUMENT_KEY: &str = "invoices.json";

/// Persistent invoice collection.
///
/// The whole collection is one JSON array. A missing document reads as an
/// empty collection; a document that fails to parse is an error and is never
/// overwritten implicitly.
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    operator: Operator,
    provider: &'static str,
}

impl InvoiceStore {
    /// Open a store on the given backend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the backend cannot be built.
    pub fn open(provider: &StoreProvider) -> Result<Self, StoreError> {
        let operator = create_operator(provider)?;
        debug!(provider = provider.name(), "invoice store opened");
        Ok(Self {
            operator,
            provider: provider.name(),
        })
    }

    /// Open an empty store held in memory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the backend cannot be built.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(&StoreProvider::Memory)
    }

    /// Backend name for log output.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// All invoices in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the document is corrupt.
    pub async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let bytes = match self.operator.read(DOCUMENT_KEY).await {
            Ok(buffer) => buffer.to_vec(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = DOCUMENT_KEY, "no invoice document yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let invoices: Vec<Invoice> = serde_json::from_slice(&bytes)?;
        debug!(count = invoices.len(), "loaded invoices");
        Ok(invoices)
    }

    /// The invoice with this id, if stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the document is corrupt.
    pub async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.list().await?.into_iter().find(|invoice| invoice.id == id))
    }

    /// Insert or replace by id. New invoices are appended; existing ones
    /// keep their position.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the document is corrupt.
    pub async fn save(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let mut invoices = self.list().await?;
        match invoices.iter_mut().find(|stored| stored.id == invoice.id) {
            Some(stored) => *stored = invoice.clone(),
            None => invoices.push(invoice.clone()),
        }
        self.write_all(&invoices).await?;
        info!(
            invoice_id = %invoice.id,
            invoice_number = invoice.invoice_number(),
            "invoice saved"
        );
        Ok(())
    }

    /// Remove by id. Returns whether anything was removed; unknown ids are
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the document is corrupt.
    pub async fn delete(&self, id: InvoiceId) -> Result<bool, StoreError> {
        let mut invoices = self.list().await?;
        let before = invoices.len();
        invoices.retain(|invoice| invoice.id != id);
        if invoices.len() == before {
            debug!(invoice_id = %id, "delete of unknown invoice ignored");
            return Ok(false);
        }
        self.write_all(&invoices).await?;
        info!(invoice_id = %id, "invoice deleted");
        Ok(true)
    }

    /// Next free invoice number for the month of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the document is corrupt.
    pub async fn next_invoice_number(&self, now: &impl Datelike) -> Result<String, StoreError> {
        let invoices = self.list().await?;
        Ok(next_invoice_number(&invoices, now))
    }

    /// Validate, compute and persist a new invoice with a fresh id.
    ///
    /// The form must already carry its invoice number. A number that is
    /// already in use is logged and accepted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Invalid` if the form fails validation, or a
    /// backend error.
    pub async fn create(
        &self,
        form: &InvoiceFormInput,
        now: DateTime<Utc>,
    ) -> Result<Invoice, StoreError> {
        let body = compose_invoice_body(form.validated()?);
        let mut invoices = self.list().await?;
        if invoices
            .iter()
            .any(|stored| stored.invoice_number() == body.invoice_number)
        {
            warn!(
                invoice_number = %body.invoice_number,
                "invoice number already in use"
            );
        }

        let invoice = body.into_invoice(InvoiceId::new(), now);
        invoices.push(invoice.clone());
        self.write_all(&invoices).await?;
        info!(
            invoice_id = %invoice.id,
            invoice_number = invoice.invoice_number(),
            total = %invoice.body.total,
            "invoice created"
        );
        Ok(invoice)
    }

    /// Recompute an existing invoice from edited form input, keeping its id
    /// and creation time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id, `StoreError::Invalid`
    /// if the form fails validation, or a backend error.
    pub async fn update(
        &self,
        id: InvoiceId,
        form: &InvoiceFormInput,
    ) -> Result<Invoice, StoreError> {
        let body = compose_invoice_body(form.validated()?);
        let mut invoices = self.list().await?;
        let stored = invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        stored.replace_body(body);
        let updated = stored.clone();

        self.write_all(&invoices).await?;
        info!(
            invoice_id = %id,
            invoice_number = updated.invoice_number(),
            "invoice updated"
        );
        Ok(updated)
    }

    async fn write_all(&self, invoices: &[Invoice]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(invoices)?;
        self.operator.write(DOCUMENT_KEY, body).await?;
        Ok(())
    }
}

fn create_operator(provider: &StoreProvider) -> Result<Operator, StoreError> {
    let operator = match provider {
        StoreProvider::LocalFs { root } => {
            let root = root
                .to_str()
                .ok_or_else(|| StoreError::configuration("invalid path"))?;
            Operator::new(services::Fs::default().root(root)).map(|builder| builder.finish())
        }
        StoreProvider::Memory => {
            Operator::new(services::Memory::default()).map(|builder| builder.finish())
        }
    };
    operator.map_err(|e| StoreError::configuration(e.to_string()))
}
