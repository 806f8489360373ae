//! Property-based tests for invoice calculation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculation::{compose_invoice_body, compute_subtotal, compute_tax, process_line_items};
use super::types::{Client, Company, InvoiceFormInput, LineItemInput, TaxConfiguration, TaxType};

/// Strategy for a unit price from 0.00 to 100,000.00.
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for a percent rate from 0.00 to 100.00.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|basis| Decimal::new(basis, 2))
}

fn line_item() -> impl Strategy<Value = LineItemInput> {
    ("[a-zA-Z ]{1,20}", 1u32..1_000u32, unit_price()).prop_map(
        |(description, quantity, unit_price)| LineItemInput {
            description,
            quantity,
            unit_price,
        },
    )
}

fn tax_configuration() -> impl Strategy<Value = TaxConfiguration> {
    prop_oneof![
        rate().prop_map(TaxConfiguration::flat),
        (rate(), rate(), rate()).prop_map(|(cgst_rate, sgst_rate, igst_rate)| {
            TaxConfiguration::Split {
                tax_type: TaxType::Interstate,
                cgst_rate,
                sgst_rate,
                igst_rate,
            }
        }),
        (rate(), rate(), rate()).prop_map(|(cgst_rate, sgst_rate, igst_rate)| {
            TaxConfiguration::Split {
                tax_type: TaxType::Intrastate,
                cgst_rate,
                sgst_rate,
                igst_rate,
            }
        }),
    ]
}

fn form_input() -> impl Strategy<Value = InvoiceFormInput> {
    (
        prop::collection::vec(line_item(), 0..12),
        tax_configuration(),
        (0i64..=20_000i64).prop_map(|basis| Decimal::new(basis, 2)),
        prop::option::of(unit_price()),
    )
        .prop_map(|(services, tax, discount_rate, token_amount)| InvoiceFormInput {
            invoice_number: "INV - June - 01".to_string(),
            company: Company {
                name: "Intraverse Technologies".to_string(),
                address: "Jabalpur, India".to_string(),
                email: "billing@intraverse.in".to_string(),
                phone: String::new(),
            },
            client: Client {
                name: "Client".to_string(),
                company: String::new(),
                email: "client@example.in".to_string(),
                address: "Somewhere".to_string(),
                phone: None,
            },
            services,
            tax,
            discount_rate,
            token_amount,
            due_date: NaiveDate::from_ymd_opt(2026, 6, 30).expect("valid date"),
            tariff_code: "998399".to_string(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Subtotal equals the independently computed Σ quantity × unit price,
    /// whatever the order of the services.
    #[test]
    fn prop_subtotal_is_order_independent(
        services in prop::collection::vec(line_item(), 0..12),
        rotation in 0usize..12,
    ) {
        let expected: Decimal = services
            .iter()
            .map(|s| Decimal::from(s.quantity) * s.unit_price)
            .sum();

        let mut reordered = services.clone();
        reordered.reverse();
        if !reordered.is_empty() {
            let by = rotation % reordered.len();
            reordered.rotate_left(by);
        }

        prop_assert_eq!(compute_subtotal(&process_line_items(&services)), expected);
        prop_assert_eq!(compute_subtotal(&process_line_items(&reordered)), expected);
    }

    /// Interstate populates only IGST; intrastate only CGST + SGST.
    #[test]
    fn prop_split_components_are_exclusive(
        subtotal in unit_price(),
        tax in tax_configuration(),
    ) {
        let breakdown = compute_tax(subtotal, &tax);
        match tax {
            TaxConfiguration::Split { tax_type: TaxType::Interstate, .. } => {
                prop_assert_eq!(breakdown.cgst_amount, Decimal::ZERO);
                prop_assert_eq!(breakdown.sgst_amount, Decimal::ZERO);
                prop_assert_eq!(breakdown.total_tax_amount, breakdown.igst_amount);
            }
            TaxConfiguration::Split { tax_type: TaxType::Intrastate, .. } => {
                prop_assert_eq!(breakdown.igst_amount, Decimal::ZERO);
                prop_assert_eq!(
                    breakdown.total_tax_amount,
                    breakdown.cgst_amount + breakdown.sgst_amount
                );
            }
            TaxConfiguration::Flat { tax_rate } => {
                prop_assert_eq!(breakdown.total_tax_amount, subtotal * tax_rate / Decimal::ONE_HUNDRED);
            }
        }
    }

    /// total = subtotal + tax − discount and remaining = total − token, exactly.
    #[test]
    fn prop_total_identity(form in form_input()) {
        let body = compose_invoice_body(&form);

        prop_assert_eq!(
            body.total,
            body.subtotal + body.tax_breakdown.total_tax_amount - body.discount_amount
        );
        prop_assert_eq!(
            body.remaining_amount,
            form.token_amount.map(|token| body.total - token)
        );
        prop_assert_eq!(body.services.len(), form.services.len());
    }

    /// Composing twice from the same input yields identical output.
    #[test]
    fn prop_compose_is_idempotent(form in form_input()) {
        prop_assert_eq!(compose_invoice_body(&form), compose_invoice_body(&form));
    }
}
