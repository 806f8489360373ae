//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Issuing company profile, fixed per deployment.
    #[serde(default)]
    pub company: CompanyConfig,
    /// Invoice store configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Defaults used to pre-fill new invoice forms.
    #[serde(default)]
    pub defaults: InvoiceDefaults,
}

/// Issuing company profile printed on every invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Legal or trading name.
    #[serde(default = "default_company_name")]
    pub name: String,
    /// Postal address.
    #[serde(default = "default_company_address")]
    pub address: String,
    /// Contact email.
    #[serde(default = "default_company_email")]
    pub email: String,
    /// Contact phone.
    #[serde(default = "default_company_phone")]
    pub phone: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            address: default_company_address(),
            email: default_company_email(),
            phone: default_company_phone(),
        }
    }
}

fn default_company_name() -> String {
    "Intraverse Technologies".to_string()
}

fn default_company_address() -> String {
    "Jabalpur, India".to_string()
}

fn default_company_email() -> String {
    "billing@intraverse.example".to_string()
}

fn default_company_phone() -> String {
    "+91 00000 00000".to_string()
}

/// Invoice store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding the invoice document.
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

/// Defaults for new invoice forms.
///
/// Tax settings are kept as raw values here; the core crate maps them onto
/// its tax configuration type.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceDefaults {
    /// `interstate` or `intrastate`; ignored when `flat_tax_rate` is set.
    #[serde(default = "default_tax_type")]
    pub tax_type: String,
    /// IGST percent applied to interstate supplies.
    #[serde(default = "default_igst_rate")]
    pub igst_rate: Decimal,
    /// CGST percent applied to intrastate supplies.
    #[serde(default = "default_half_rate")]
    pub cgst_rate: Decimal,
    /// SGST percent applied to intrastate supplies.
    #[serde(default = "default_half_rate")]
    pub sgst_rate: Decimal,
    /// When set, a single flat tax rate is used instead of the GST split.
    #[serde(default)]
    pub flat_tax_rate: Option<Decimal>,
    /// Discount percent.
    #[serde(default)]
    pub discount_rate: Decimal,
    /// Days between issue and due date.
    #[serde(default = "default_due_in_days")]
    pub due_in_days: u32,
    /// Six-digit HSN/SAC code.
    #[serde(default = "default_tariff_code")]
    pub tariff_code: String,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            tax_type: default_tax_type(),
            igst_rate: default_igst_rate(),
            cgst_rate: default_half_rate(),
            sgst_rate: default_half_rate(),
            flat_tax_rate: None,
            discount_rate: Decimal::ZERO,
            due_in_days: default_due_in_days(),
            tariff_code: default_tariff_code(),
        }
    }
}

fn default_tax_type() -> String {
    "interstate".to_string()
}

fn default_igst_rate() -> Decimal {
    Decimal::from(18)
}

fn default_half_rate() -> Decimal {
    Decimal::from(9)
}

fn default_due_in_days() -> u32 {
    30
}

fn default_tariff_code() -> String {
    "998399".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
