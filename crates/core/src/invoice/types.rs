//! Invoice domain types.
//!
//! Field names serialize in camelCase so stored documents keep the shape
//! used by the browser front end (`invoiceNumber`, `unitPrice`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::config::{CompanyConfig, InvoiceDefaults};
use tally_shared::types::InvoiceId;

use super::error::InvoiceError;

/// Issuing company contact block. Fixed per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
}

impl From<CompanyConfig> for Company {
    fn from(config: CompanyConfig) -> Self {
        Self {
            name: config.name,
            address: config.address,
            email: config.email,
            phone: config.phone,
        }
    }
}

/// Billed client contact block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Contact person or client name.
    pub name: String,
    /// Client's company, empty when billing an individual.
    #[serde(default)]
    pub company: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Optional contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One billable service as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    /// What is being billed.
    pub description: String,
    /// Units billed (callers coerce invalid input to 1).
    pub quantity: u32,
    /// Price per unit (callers coerce invalid input to 0).
    pub unit_price: Decimal,
}

/// A processed line item with its identifier and derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Sequence-based identifier, `service-{n}` with `n` 1-based.
    pub id: String,
    /// What is being billed.
    pub description: String,
    /// Units billed.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `quantity × unit_price`.
    pub total: Decimal,
}

/// GST jurisdiction of a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// Supply across state lines: IGST applies.
    Interstate,
    /// Supply within one state: CGST and SGST apply together.
    Intrastate,
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interstate => write!(f, "interstate"),
            Self::Intrastate => write!(f, "intrastate"),
        }
    }
}

impl std::str::FromStr for TaxType {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interstate" => Ok(Self::Interstate),
            "intrastate" => Ok(Self::Intrastate),
            _ => Err(InvoiceError::InvalidTaxType(s.to_string())),
        }
    }
}

/// How tax is levied on an invoice. Exactly one path is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum TaxConfiguration {
    /// One rate applied to the subtotal.
    Flat {
        /// Tax percent.
        tax_rate: Decimal,
    },
    /// GST split by jurisdiction.
    ///
    /// All three rates are retained whichever jurisdiction is active, so a
    /// record can be switched between the two without losing input.
    Split {
        /// Active jurisdiction.
        tax_type: TaxType,
        /// Central GST percent (intrastate).
        #[serde(default)]
        cgst_rate: Decimal,
        /// State GST percent (intrastate).
        #[serde(default)]
        sgst_rate: Decimal,
        /// Integrated GST percent (interstate).
        #[serde(default)]
        igst_rate: Decimal,
    },
}

impl TaxConfiguration {
    /// Creates a flat-rate configuration.
    #[must_use]
    pub const fn flat(tax_rate: Decimal) -> Self {
        Self::Flat { tax_rate }
    }

    /// Creates an interstate configuration levying only IGST.
    #[must_use]
    pub const fn interstate(igst_rate: Decimal) -> Self {
        Self::Split {
            tax_type: TaxType::Interstate,
            cgst_rate: Decimal::ZERO,
            sgst_rate: Decimal::ZERO,
            igst_rate,
        }
    }

    /// Creates an intrastate configuration levying CGST and SGST.
    #[must_use]
    pub const fn intrastate(cgst_rate: Decimal, sgst_rate: Decimal) -> Self {
        Self::Split {
            tax_type: TaxType::Intrastate,
            cgst_rate,
            sgst_rate,
            igst_rate: Decimal::ZERO,
        }
    }

    /// Builds the configured default tax setup for new forms.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::InvalidTaxType` if the configured tax type is
    /// neither `interstate` nor `intrastate`.
    pub fn from_defaults(defaults: &InvoiceDefaults) -> Result<Self, InvoiceError> {
        if let Some(tax_rate) = defaults.flat_tax_rate {
            return Ok(Self::Flat { tax_rate });
        }

        Ok(Self::Split {
            tax_type: defaults.tax_type.parse()?,
            cgst_rate: defaults.cgst_rate,
            sgst_rate: defaults.sgst_rate,
            igst_rate: defaults.igst_rate,
        })
    }

    /// Every rate carried by the configuration, labelled by form field.
    #[must_use]
    pub fn rates(&self) -> Vec<(&'static str, Decimal)> {
        match self {
            Self::Flat { tax_rate } => vec![("taxRate", *tax_rate)],
            Self::Split {
                cgst_rate,
                sgst_rate,
                igst_rate,
                ..
            } => vec![
                ("cgstRate", *cgst_rate),
                ("sgstRate", *sgst_rate),
                ("igstRate", *igst_rate),
            ],
        }
    }
}

/// Computed tax amounts. Inactive components are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    /// Central GST amount.
    pub cgst_amount: Decimal,
    /// State GST amount.
    pub sgst_amount: Decimal,
    /// Integrated GST amount.
    pub igst_amount: Decimal,
    /// Sum of the active components (or the flat tax).
    pub total_tax_amount: Decimal,
}

/// Raw form input for creating or editing an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormInput {
    /// Business-facing invoice number.
    #[serde(default)]
    pub invoice_number: String,
    /// Issuing company.
    pub company: Company,
    /// Billed client.
    pub client: Client,
    /// Services in display order.
    pub services: Vec<LineItemInput>,
    /// Tax setup.
    pub tax: TaxConfiguration,
    /// Discount percent applied to the subtotal.
    #[serde(default)]
    pub discount_rate: Decimal,
    /// Partial payment collected upfront.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_amount: Option<Decimal>,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Six-digit HSN/SAC classification code.
    #[serde(alias = "hsnCode", alias = "hscCode")]
    pub tariff_code: String,
}

/// Fully derived invoice content, lacking only identity and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceBody {
    /// Business-facing invoice number.
    pub invoice_number: String,
    /// Issuing company.
    pub company: Company,
    /// Billed client.
    pub client: Client,
    /// Processed services in input order.
    pub services: Vec<LineItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Tax setup used.
    pub tax: TaxConfiguration,
    /// Computed tax amounts.
    pub tax_breakdown: TaxBreakdown,
    /// Discount percent.
    pub discount_rate: Decimal,
    /// `subtotal × discount_rate / 100`.
    pub discount_amount: Decimal,
    /// `subtotal + total tax − discount`, not clamped at zero.
    pub total: Decimal,
    /// Partial payment collected upfront.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_amount: Option<Decimal>,
    /// `total − token_amount`, present exactly when a token amount is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<Decimal>,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Six-digit HSN/SAC classification code.
    #[serde(alias = "hsnCode", alias = "hscCode")]
    pub tariff_code: String,
}

impl InvoiceBody {
    /// Attaches identity and creation time, producing a persistable invoice.
    #[must_use]
    pub fn into_invoice(self, id: InvoiceId, created_at: DateTime<Utc>) -> Invoice {
        Invoice {
            id,
            created_at,
            body: self,
        }
    }
}

/// A persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Opaque identity, never changed after creation.
    pub id: InvoiceId,
    /// Creation timestamp, never changed after creation.
    pub created_at: DateTime<Utc>,
    /// Everything else; replaced wholesale on edit.
    #[serde(flatten)]
    pub body: InvoiceBody,
}

impl Invoice {
    /// Replaces every field except identity and creation time.
    pub fn replace_body(&mut self, body: InvoiceBody) {
        self.body = body;
    }

    /// Business-facing invoice number.
    #[must_use]
    pub fn invoice_number(&self) -> &str {
        &self.body.invoice_number
    }
}
