//! Record storage for the masked-rides relay.
//!
//! Customers, drivers and carrier-leased proxy numbers are provisioned out
//! of band and loaded at startup; rides are appended by the registrar and
//! never mutated. The whole record set can be persisted as a JSON file so
//! an operator can edit it directly.

mod error;
mod records;
mod store;
mod types;

pub use error::StoreError;
pub use records::Records;
pub use store::{FileStore, MemoryStore, Store};
pub use types::*;
