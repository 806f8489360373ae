//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are carried as `rust_decimal::Decimal` and only rounded at
//! presentation time.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit digits shown for rupee amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to paise (2 decimal places), midpoint away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Indian rupees with lakh/crore digit grouping.
///
/// `2160` becomes `₹2,160.00`, `12345678.5` becomes `₹1,23,45,678.50` and
/// negative amounts carry a leading minus: `-₹640.00`.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

/// Groups digits as `xx,xx,xxx` (last three, then pairs).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
