//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO storage or UI dependencies.
//! All invoice types, calculations, validation rules, and numbering live here.
//!
//! # Modules
//!
//! - `invoice` - Invoice records, amount calculation, validation, and rendering
//! - `numbering` - Month-scoped sequential invoice numbers

pub mod invoice;
pub mod numbering;
