//! Number, money and date formatting for rendered documents.

use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use tia_shared::types::{Currency, MONEY_DECIMAL_PLACES, round_money};

use crate::invoice::InvoiceError;

/// Number of decimal places used when displaying an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Largest scale a `Decimal` can carry.
    pub const MAX_DECIMAL_PLACES: u32 = 28;

    /// Two decimal places, the default for money.
    pub const MONEY: Self = Self(MONEY_DECIMAL_PLACES);

    /// No decimal places, used for quantities.
    pub const WHOLE: Self = Self(0);

    /// Creates a precision from a caller request.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::UnsupportedPrecision` unless `0 <= places <= 28`.
    pub fn new(places: i64) -> Result<Self, InvoiceError> {
        u32::try_from(places)
            .ok()
            .filter(|places| *places <= Self::MAX_DECIMAL_PLACES)
            .map(Self)
            .ok_or(InvoiceError::UnsupportedPrecision(places))
    }

    /// The number of decimal places.
    #[must_use]
    pub fn decimal_places(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::MONEY
    }
}

/// Rounds `value` and prints exactly `precision` decimal places.
#[must_use]
pub fn format_amount(value: Decimal, precision: Precision) -> String {
    let places = precision.decimal_places();
    let mut rounded = round_money(value, places);
    rounded.rescale(places);
    rounded.to_string()
}

/// Quantities are shown without decimals.
#[must_use]
pub fn format_quantity(value: Decimal) -> String {
    format_amount(value, Precision::WHOLE)
}

/// Formats an amount and places the currency symbol.
///
/// ```
/// use rust_decimal::Decimal;
/// use tia_core::render::{Precision, format_money};
/// use tia_shared::types::{Currency, SymbolPosition};
///
/// let eur = Currency::eur();
/// let amount = Decimal::new(12345, 1);
/// assert_eq!(format_money(amount, &eur, Precision::MONEY), "1234.50 €");
///
/// let prefix = eur.with_position(SymbolPosition::Prefix);
/// assert_eq!(format_money(amount, &prefix, Precision::MONEY), "€ 1234.50");
/// ```
#[must_use]
pub fn format_money(value: Decimal, currency: &Currency, precision: Precision) -> String {
    currency.decorate(&format_amount(value, precision))
}

/// Zero-pads the invoice number to `width` digits.
#[must_use]
pub fn format_invoice_number(number: u64, width: usize) -> String {
    format!("{number:0width$}")
}

/// Percent rate without trailing zeros (`19`, `7.5`).
#[must_use]
pub fn format_percent(rate: Decimal) -> String {
    rate.normalize().to_string()
}

/// Formats `date` with a strftime-style `pattern`.
///
/// # Errors
///
/// Returns `InvoiceError::InvalidDateFormat` if the pattern is malformed or
/// asks for fields a calendar date does not have.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String, InvoiceError> {
    let invalid = || InvoiceError::InvalidDateFormat(pattern.to_string());
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).map_err(|_| invalid())?;
    Ok(out)
}
