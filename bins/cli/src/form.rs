//! Form files: skeletons built from configuration, and completion of
//! partially filled forms.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;
use tally_core::invoice::{Client, Company, InvoiceFormInput, LineItemInput, TaxConfiguration};
use tally_shared::{AppConfig, AppError, AppResult};

/// Accepted spellings of the classification code field.
const TARIFF_CODE_KEYS: [&str; 3] = ["tariffCode", "hsnCode", "hscCode"];

/// A blank form pre-filled with the configured company and defaults.
pub fn template(
    config: &AppConfig,
    today: NaiveDate,
    invoice_number: &str,
) -> AppResult<InvoiceFormInput> {
    let defaults = &config.defaults;
    let due_date = today
        .checked_add_days(Days::new(u64::from(defaults.due_in_days)))
        .ok_or_else(|| AppError::Configuration("due date offset out of range".to_string()))?;

    Ok(InvoiceFormInput {
        invoice_number: invoice_number.to_string(),
        company: Company::from(config.company.clone()),
        client: Client {
            name: String::new(),
            company: String::new(),
            email: String::new(),
            address: String::new(),
            phone: None,
        },
        services: vec![LineItemInput {
            description: String::new(),
            quantity: 1,
            unit_price: Decimal::ZERO,
        }],
        tax: TaxConfiguration::from_defaults(defaults)?,
        discount_rate: defaults.discount_rate,
        token_amount: None,
        due_date,
        tariff_code: defaults.tariff_code.clone(),
    })
}

/// Fills every top-level field the form file leaves out from `template`.
///
/// A blank `invoiceNumber` counts as missing, and the tariff code counts as
/// given under any of its accepted spellings. Fields the file does give are
/// kept as written, even when invalid; validation reports those later.
pub fn complete(raw: Value, template: &InvoiceFormInput) -> AppResult<InvoiceFormInput> {
    let Value::Object(mut fields) = raw else {
        return Err(AppError::Validation(
            "form file must contain a JSON object".to_string(),
        ));
    };

    let blank_number = fields
        .get("invoiceNumber")
        .and_then(Value::as_str)
        .is_some_and(|number| number.trim().is_empty());
    if blank_number {
        fields.remove("invoiceNumber");
    }

    let Value::Object(defaults) = serde_json::to_value(template).map_err(serialization)? else {
        return Err(AppError::Internal("form template is not an object".to_string()));
    };
    let tariff_given = TARIFF_CODE_KEYS.iter().any(|key| fields.contains_key(*key));
    for (key, value) in defaults {
        if tariff_given && key == TARIFF_CODE_KEYS[0] {
            continue;
        }
        fields.entry(key).or_insert(value);
    }

    serde_json::from_value(Value::Object(fields)).map_err(serialization)
}

#[allow(clippy::needless_pass_by_value)]
fn serialization(err: serde_json::Error) -> AppError {
    AppError::Serialization(err.to_string())
}
