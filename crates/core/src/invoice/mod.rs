//! Invoice accumulation.
//!
//! This module implements the invoice data model and the accumulator:
//! - Parties (company and client) and invoice metadata
//! - Line item declarations and validation
//! - The running invoice state and its one-way finalization
//! - Error types for invoice operations

pub mod error;
pub mod state;
pub mod types;
pub mod validation;

#[cfg(test)]
mod state_props;

pub use error::InvoiceError;
pub use state::{FinalizedInvoice, InvoiceState, InvoiceSummary};
pub use types::{
    Client, Company, InvoiceMeta, InvoiceTotals, LineItem, LineItemInput, Party,
};
pub use validation::{MAX_VAT_RATE, parse_decimal, validate_item, validate_vat_rate};
