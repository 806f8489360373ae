//! Invoice persistence for Tally.
//!
//! Invoices are kept as one JSON document in a key-value backend provided
//! by Apache OpenDAL (local filesystem, or memory for tests and dry runs).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     InvoiceStore                          │
//! │  list / get / save / delete / create / update             │
//! ├──────────────────────────────────────────────────────────┤
//! │              Apache OpenDAL Operator                      │
//! │      read("invoices.json") / write("invoices.json")      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are read-modify-write of the whole document with no locking:
//! two writers racing on the same root lose one update (last write wins).

mod config;
mod error;
mod store;

pub use config::StoreProvider;
pub use error::StoreError;
pub use store::{DOCUMENT_KEY, InvoiceStore};
