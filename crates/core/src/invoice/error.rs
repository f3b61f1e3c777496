//! Invoice error types for validation and formatting errors.
//!
//! Validation errors are raised when an item or the invoice metadata is
//! declared, before any running total is touched. Formatting errors are
//! raised when a document is rendered with unsupported options.

use thiserror::Error;
use tia_shared::AppError;

/// Errors that can occur while building or rendering an invoice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    // ========== Validation Errors ==========
    /// A line item violates a business rule.
    #[error("Invalid item #{position} ({label}): {reason}")]
    InvalidItem {
        /// 1-based declaration position of the item.
        position: usize,
        /// The item label as declared.
        label: String,
        /// What is wrong with the item.
        reason: String,
    },

    /// Textual numeric input could not be parsed.
    #[error("Field '{field}' is not a number: '{value}'")]
    NotANumber {
        /// The field being parsed.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Invoice metadata (company, client, defaults) is invalid.
    #[error("Invalid invoice data: {0}")]
    InvalidMeta(String),

    /// Company bank account data is incomplete.
    #[error("Company account data missing: {0}")]
    AccountDataMissing(&'static str),

    /// An amount exceeds the representable decimal range.
    #[error("Amount overflow in item #{0}")]
    AmountOverflow(usize),

    // ========== Formatting Errors ==========
    /// Precision request outside the supported range.
    #[error("Unsupported precision: {0} decimal places (supported: 0 to 28)")]
    UnsupportedPrecision(i64),

    /// Date pattern cannot be rendered.
    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    /// Document could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl InvoiceError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidItem { .. } => "INVALID_ITEM",
            Self::NotANumber { .. } => "NOT_A_NUMBER",
            Self::InvalidMeta(_) => "INVALID_META",
            Self::AccountDataMissing(_) => "ACCOUNT_DATA_MISSING",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::UnsupportedPrecision(_) => "UNSUPPORTED_PRECISION",
            Self::InvalidDateFormat(_) => "INVALID_DATE_FORMAT",
            Self::Serialization(_) => "SERIALIZATION_FAILED",
        }
    }

    /// Returns true for errors raised while declaring data.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidItem { .. }
                | Self::NotANumber { .. }
                | Self::InvalidMeta(_)
                | Self::AccountDataMissing(_)
                | Self::AmountOverflow(_)
        )
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Formatting(err.to_string())
        }
    }
}
