//! Parsed invoice numbers and an explicit per-month counter.
//!
//! Library API for embedders that issue numbers from one long-lived owner.
//! The bundled store and CLI number invoices with the scan in
//! [`super::generator`] instead, which needs no state between runs.

use chrono::Datelike;

use super::generator::{MONTH_NAMES, PREFIX, SEPARATOR, format_number, max_sequence_in_month};
use crate::invoice::InvoiceError;

/// A well-formed `INV - {Month} - {NN}` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoiceNumber {
    month: u32,
    sequence: u64,
}

impl InvoiceNumber {
    /// Creates a number for a 1-based `month`.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::InvalidInvoiceNumber` if `month` is not in
    /// `1..=12` or `sequence` is zero.
    pub fn new(month: u32, sequence: u64) -> Result<Self, InvoiceError> {
        if !(1..=12).contains(&month) || sequence == 0 {
            return Err(InvoiceError::InvalidInvoiceNumber(format!(
                "month {month}, sequence {sequence}"
            )));
        }
        Ok(Self { month, sequence })
    }

    /// Month of issue, 1-based.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Position within the month, starting at 1.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// English name of the month of issue.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_number(self.month_name(), self.sequence))
    }
}

impl std::str::FromStr for InvoiceNumber {
    type Err = InvoiceError;

    /// Strict parse: unlike the generator's lenient scan, every segment must
    /// be well formed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvoiceError::InvalidInvoiceNumber(s.to_string());

        let mut parts = s.split(SEPARATOR);
        let (Some(prefix), Some(month), Some(sequence), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if prefix != PREFIX || sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let month = MONTH_NAMES
            .iter()
            .position(|name| *name == month)
            .ok_or_else(invalid)?;
        let month = u32::try_from(month + 1).map_err(|_| invalid())?;
        let sequence = sequence.parse().map_err(|_| invalid())?;

        Self::new(month, sequence).map_err(|_| invalid())
    }
}

/// Explicit last-issued counter for one calendar month.
///
/// Seeded once from the stored numbers, then advanced in memory, which
/// avoids rescanning the whole collection for every new invoice. Issuing
/// takes `&mut self`, so one owner issues numbers at a time. When the
/// clock moves into a different month the counter starts again at 1.
/// Once `u64::MAX` has been issued in a month, further issues fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySequence {
    year: i32,
    month: u32,
    last_issued: u64,
}

impl MonthlySequence {
    /// Seeds the counter for the month of `now` from already-issued numbers.
    pub fn seed<I, S>(numbers: I, now: &impl Datelike) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            year: now.year(),
            month: now.month(),
            last_issued: max_sequence_in_month(numbers, now),
        }
    }

    /// Creates a counter for `year`/`month` whose last issued value is known.
    #[must_use]
    pub const fn starting_at(year: i32, month: u32, last_issued: u64) -> Self {
        Self {
            year,
            month,
            last_issued,
        }
    }

    /// Last sequence value issued in the current scope (0 if none).
    #[must_use]
    pub const fn last_issued(&self) -> u64 {
        self.last_issued
    }

    /// Year and month the counter currently covers.
    #[must_use]
    pub const fn scope(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Previews the number `issue` would return at `now` without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::SequenceExhausted` if the month has no numbers left.
    pub fn peek(&self, now: &impl Datelike) -> Result<InvoiceNumber, InvoiceError> {
        let last = if self.covers(now) { self.last_issued } else { 0 };
        Ok(InvoiceNumber {
            month: now.month(),
            sequence: successor(last, now.month())?,
        })
    }

    /// Issues the next number for `now`, rolling over to a fresh month scope
    /// first if needed.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::SequenceExhausted` if the month has no numbers
    /// left; the counter is unchanged.
    pub fn issue(&mut self, now: &impl Datelike) -> Result<InvoiceNumber, InvoiceError> {
        let number = self.peek(now)?;
        self.year = now.year();
        self.month = number.month;
        self.last_issued = number.sequence;
        Ok(number)
    }

    /// Records a number issued elsewhere (e.g. typed in by hand) so the
    /// counter never hands it out again. Numbers from other months are ignored.
    pub fn observe(&mut self, number: &InvoiceNumber) {
        if number.month == self.month {
            self.last_issued = self.last_issued.max(number.sequence);
        }
    }

    fn covers(&self, now: &impl Datelike) -> bool {
        self.year == now.year() && self.month == now.month()
    }
}

fn successor(last: u64, month: u32) -> Result<u64, InvoiceError> {
    last.checked_add(1).ok_or_else(|| {
        InvoiceError::SequenceExhausted(MONTH_NAMES[(month - 1) as usize].to_string())
    })
}
