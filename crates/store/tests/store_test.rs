//! Integration tests for the invoice store.
//!
//! Run against the in-memory backend, plus one pass over a real directory
//! under the system temp dir.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tally_core::invoice::{
    Client, Company, InvoiceFormInput, LineItemInput, TaxConfiguration,
};
use tally_shared::types::InvoiceId;
use tally_store::{InvoiceStore, StoreError, StoreProvider};

fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap()
}

fn form(invoice_number: &str) -> InvoiceFormInput {
    InvoiceFormInput {
        invoice_number: invoice_number.to_string(),
        company: Company {
            name: "Intraverse Technologies".to_string(),
            address: "Jabalpur, India".to_string(),
            email: "billing@intraverse.in".to_string(),
            phone: "+91 00000 00000".to_string(),
        },
        client: Client {
            name: "Asha Rao".to_string(),
            company: "Rao Textiles".to_string(),
            email: "asha@raotextiles.in".to_string(),
            address: "Pune, India".to_string(),
            phone: None,
        },
        services: vec![
            LineItemInput {
                description: "UI/UX Design & Prototyping".to_string(),
                quantity: 2,
                unit_price: dec!(500),
            },
            LineItemInput {
                description: "Frontend Development".to_string(),
                quantity: 1,
                unit_price: dec!(1000),
            },
        ],
        tax: TaxConfiguration::interstate(dec!(18)),
        discount_rate: dec!(10),
        token_amount: Some(dec!(500)),
        due_date: NaiveDate::from_ymd_opt(2026, 4, 9).unwrap(),
        tariff_code: "998399".to_string(),
    }
}

fn memory_store() -> InvoiceStore {
    InvoiceStore::in_memory().expect("memory store")
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let store = memory_store();
    assert!(store.list().await.unwrap().is_empty());
    assert!(store.get(InvoiceId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_computes_and_persists() {
    let store = memory_store();
    let invoice = store.create(&form("INV - March - 01"), march(10)).await.unwrap();

    assert_eq!(invoice.created_at, march(10));
    assert_eq!(invoice.body.subtotal, dec!(2000));
    assert_eq!(invoice.body.tax_breakdown.igst_amount, dec!(360));
    assert_eq!(invoice.body.discount_amount, dec!(200));
    assert_eq!(invoice.body.total, dec!(2160));
    assert_eq!(invoice.body.remaining_amount, Some(dec!(1660)));

    let stored = store.get(invoice.id).await.unwrap();
    assert_eq!(stored, Some(invoice));
}

#[tokio::test]
async fn test_create_rejects_invalid_form() {
    let store = memory_store();
    let mut bad = form("INV - March - 01");
    bad.client.name = "  ".to_string();
    bad.services.clear();

    let inner = match store.create(&bad, march(10)).await.unwrap_err() {
        StoreError::Invalid(inner) => inner,
        other => panic!("expected validation failure, got {other:?}"),
    };
    let fields: Vec<&str> = inner.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"client.name"));
    assert!(fields.contains(&"services"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_numbers_follow_stored_invoices() {
    let store = memory_store();
    let now = march(10);
    assert_eq!(
        store.next_invoice_number(&now).await.unwrap(),
        "INV - March - 01"
    );

    for _ in 0..3 {
        let number = store.next_invoice_number(&now).await.unwrap();
        store.create(&form(&number), now).await.unwrap();
    }
    assert_eq!(
        store.next_invoice_number(&now).await.unwrap(),
        "INV - March - 04"
    );

    let april = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    assert_eq!(
        store.next_invoice_number(&april).await.unwrap(),
        "INV - April - 01"
    );
}

#[tokio::test]
async fn test_save_upserts_in_place() {
    let store = memory_store();
    let first = store.create(&form("INV - March - 01"), march(1)).await.unwrap();
    let second = store.create(&form("INV - March - 02"), march(2)).await.unwrap();

    let mut edited = first.clone();
    edited.body.client.name = "Asha R.".to_string();
    store.save(&edited).await.unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].body.client.name, "Asha R.");
    assert_eq!(all[1].id, second.id);
}

#[tokio::test]
async fn test_update_keeps_identity() {
    let store = memory_store();
    let original = store.create(&form("INV - March - 01"), march(1)).await.unwrap();

    let mut edit = form("INV - March - 01");
    edit.discount_rate = Decimal::ZERO;
    edit.token_amount = None;
    let updated = store.update(original.id, &edit).await.unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.body.total, dec!(2360));
    assert_eq!(updated.body.remaining_amount, None);
    assert_eq!(store.get(original.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let store = memory_store();
    let err = store
        .update(InvoiceId::new(), &form("INV - March - 01"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete() {
    let store = memory_store();
    let invoice = store.create(&form("INV - March - 01"), march(1)).await.unwrap();

    assert!(!store.delete(InvoiceId::new()).await.unwrap());
    assert_eq!(store.list().await.unwrap().len(), 1);

    assert!(store.delete(invoice.id).await.unwrap());
    assert!(store.list().await.unwrap().is_empty());
    assert!(!store.delete(invoice.id).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_number_is_accepted() {
    let store = memory_store();
    store.create(&form("INV - March - 01"), march(1)).await.unwrap();
    store.create(&form("INV - March - 01"), march(2)).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_local_fs_round_trip() {
    let root = std::env::temp_dir().join(format!("tally-store-{}", InvoiceId::new()));
    let provider = StoreProvider::local_fs(&root);

    let created = {
        let store = InvoiceStore::open(&provider).unwrap();
        store.create(&form("INV - March - 01"), march(1)).await.unwrap()
    };

    let reopened = InvoiceStore::open(&provider).unwrap();
    assert_eq!(reopened.list().await.unwrap(), vec![created]);
    assert!(root.join(tally_store::DOCUMENT_KEY).exists());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_corrupt_document_is_reported() {
    let root = std::env::temp_dir().join(format!("tally-store-{}", InvoiceId::new()));
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join(tally_store::DOCUMENT_KEY), b"{not json").unwrap();

    let store = InvoiceStore::open(&StoreProvider::local_fs(&root)).unwrap();
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));

    std::fs::remove_dir_all(&root).unwrap();
}
