//! Data models: invoice records and pipeline configuration.

pub mod config;
pub mod record;

pub use record::{Field, InvoiceRecord, UnknownField};
