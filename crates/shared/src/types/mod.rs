//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::InvoiceId;
pub use money::{format_inr, round_money};
