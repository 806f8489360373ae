//! Property-based tests for invoice numbering.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::generator::{MONTH_NAMES, format_number, month_name, next_number_from, parse_sequence};
use super::sequence::{InvoiceNumber, MonthlySequence};

fn date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn issued_number() -> impl Strategy<Value = String> {
    (0usize..12, 1u64..500).prop_map(|(month, seq)| format_number(MONTH_NAMES[month], seq))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The generated number is strictly greater than every number already
    /// issued in the same month, and is never one of them.
    #[test]
    fn prop_next_number_is_fresh_and_increasing(
        existing in prop::collection::vec(issued_number(), 0..30),
        now in date(),
    ) {
        let next = next_number_from(&existing, &now);
        let next_seq = parse_sequence(&next);
        let marker = format!("INV - {}", month_name(&now));
        let prefix = format!("{marker} - ");

        prop_assert!(!existing.contains(&next));
        prop_assert!(next.starts_with(&prefix));
        for number in existing.iter().filter(|n| n.contains(&marker)) {
            prop_assert!(parse_sequence(number) < next_seq);
        }
    }

    /// Arbitrary garbage in the store never breaks generation.
    #[test]
    fn prop_garbage_numbers_never_panic(
        existing in prop::collection::vec(".{0,40}", 0..20),
        now in date(),
    ) {
        let next = next_number_from(&existing, &now);
        prop_assert!(next.starts_with("INV - "));
        prop_assert!(parse_sequence(&next) >= 1);
    }

    /// Formatting then strictly parsing returns the same month and sequence.
    #[test]
    fn prop_display_parses_back(month in 1u32..=12, sequence in 1u64..100_000) {
        let number = InvoiceNumber::new(month, sequence).expect("in range");
        let parsed: InvoiceNumber = number.to_string().parse().expect("well formed");
        prop_assert_eq!(parsed, number);
    }

    /// Issuing repeatedly from a seeded counter matches rescanning the
    /// growing collection each time.
    #[test]
    fn prop_counter_agrees_with_scan(
        existing in prop::collection::vec(issued_number(), 0..20),
        now in date(),
        rounds in 1usize..10,
    ) {
        let mut stored = existing.clone();
        let mut counter = MonthlySequence::seed(&existing, &now);
        for _ in 0..rounds {
            let scanned = next_number_from(&stored, &now);
            let issued = counter.issue(&now).expect("numbers left").to_string();
            prop_assert_eq!(&issued, &scanned);
            stored.push(issued);
        }
    }
}
