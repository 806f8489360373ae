//! Scan-based invoice number generation.
//!
//! Numbers look like `INV - March - 07`: a fixed prefix, the English month
//! name, and a two-digit (or wider) sequence that restarts every month. The
//! next number is derived from the numbers already stored, so there is no
//! separate counter to drift out of sync.

use chrono::Datelike;

use crate::invoice::Invoice;

/// Literal prefix of every generated number.
pub const PREFIX: &str = "INV";

/// Separator between number segments.
pub const SEPARATOR: &str = " - ";

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English name of the month containing `date`.
#[must_use]
pub fn month_name(date: &impl Datelike) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Marker identifying numbers issued in a month, e.g. `INV - March`.
#[must_use]
pub fn month_marker(month: &str) -> String {
    format!("{PREFIX}{SEPARATOR}{month}")
}

/// Formats a number for `month` and `sequence`, zero-padded to two digits.
#[must_use]
pub fn format_number(month: &str, sequence: u64) -> String {
    format!("{PREFIX}{SEPARATOR}{month}{SEPARATOR}{sequence:02}")
}

/// Extracts the sequence from the third ` - ` segment of a number.
///
/// Leading whitespace is skipped and leading digits are read; a missing
/// segment or no digits counts as 0 so that hand-edited or legacy numbers
/// never break generation. Values beyond `u64::MAX` saturate.
#[must_use]
pub fn parse_sequence(invoice_number: &str) -> u64 {
    let digits = sequence_digits(invoice_number);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Leading digits of the third segment without leading zeros (empty for 0).
fn sequence_digits(invoice_number: &str) -> &str {
    let Some(segment) = invoice_number.split(SEPARATOR).nth(2) else {
        return "";
    };
    let trimmed = segment.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].trim_start_matches('0')
}

/// Adds one to a run of decimal digits of any length.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    let mut carry = true;
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        out.insert(0, b'1');
    }
    out.into_iter().map(char::from).collect()
}

/// Numbers issued in the month of `now`, judged by month name only.
fn in_month<I, S>(numbers: I, now: &impl Datelike) -> impl Iterator<Item = S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let marker = month_marker(month_name(now));
    numbers
        .into_iter()
        .filter(move |number| number.as_ref().contains(&marker))
}

/// Highest sequence issued in the month of `now` among `numbers` (0 if none).
///
/// Saturates at `u64::MAX`; [`next_number_from`] has no such limit.
pub fn max_sequence_in_month<I, S>(numbers: I, now: &impl Datelike) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    in_month(numbers, now)
        .map(|number| parse_sequence(number.as_ref()))
        .max()
        .unwrap_or(0)
}

/// Next number for the month of `now`, given the numbers already issued.
///
/// Sequences are compared and incremented as digit strings, so the result
/// is greater than every sequence seen in the month however long it is.
pub fn next_number_from<I, S>(numbers: I, now: &impl Datelike) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let last = in_month(numbers, now)
        .map(|number| sequence_digits(number.as_ref()).to_owned())
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .unwrap_or_default();
    let next = increment_digits(&last);
    format!(
        "{PREFIX}{SEPARATOR}{month}{SEPARATOR}{next:0>2}",
        month = month_name(now)
    )
}

/// Next invoice number for the month of `now`, given the stored invoices.
///
/// Never fails. Concurrent callers reading the same collection can compute
/// the same number; the store does not guard against that.
#[must_use]
pub fn next_invoice_number(existing: &[Invoice], now: &impl Datelike) -> String {
    next_number_from(existing.iter().map(Invoice::invoice_number), now)
}
