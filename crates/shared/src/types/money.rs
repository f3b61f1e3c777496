//! Currency description and the money rounding rule.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` and every rounding step goes
//! through [`round_money`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places money amounts are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Where the currency symbol is placed relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `"{symbol} {amount}"`, e.g. `$ 12.00`.
    Prefix,
    /// `"{amount} {symbol}"`, e.g. `12.00 €`.
    #[default]
    Postfix,
}

/// A currency as displayed on a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 currency code (e.g., "EUR", "USD").
    pub code: String,
    /// Display symbol (e.g., "€").
    pub symbol: String,
    /// Symbol placement, applied to every amount of a document.
    #[serde(default)]
    pub position: SymbolPosition,
}

/// Known ISO 4217 codes with their symbol and customary placement.
const KNOWN_CURRENCIES: &[(&str, &str, SymbolPosition)] = &[
    ("EUR", "€", SymbolPosition::Postfix),
    ("USD", "$", SymbolPosition::Prefix),
    ("GBP", "£", SymbolPosition::Prefix),
    ("CHF", "CHF", SymbolPosition::Postfix),
    ("JPY", "¥", SymbolPosition::Prefix),
    ("SGD", "S$", SymbolPosition::Prefix),
    ("IDR", "Rp", SymbolPosition::Prefix),
];

impl Currency {
    /// Creates a new currency description.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        symbol: impl Into<String>,
        position: SymbolPosition,
    ) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            position,
        }
    }

    /// Euro with a postfix symbol.
    #[must_use]
    pub fn eur() -> Self {
        Self::new("EUR", "€", SymbolPosition::Postfix)
    }

    /// Returns the same currency with a different symbol placement.
    #[must_use]
    pub fn with_position(mut self, position: SymbolPosition) -> Self {
        self.position = position;
        self
    }

    /// Attaches the symbol to an already formatted amount.
    #[must_use]
    pub fn decorate(&self, amount: &str) -> String {
        match self.position {
            SymbolPosition::Prefix => format!("{} {amount}", self.symbol),
            SymbolPosition::Postfix => format!("{amount} {}", self.symbol),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::eur()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        KNOWN_CURRENCIES
            .iter()
            .find(|(known, _, _)| *known == code)
            .map(|(known, symbol, position)| Self::new(*known, *symbol, *position))
            .ok_or_else(|| format!("Unknown currency: {s}"))
    }
}

/// Rounds a value to `decimal_places` using Banker's Rounding.
///
/// `MidpointNearestEven` is the only tie-break rule in the system:
/// `0.125 -> 0.12`, `0.135 -> 0.14`.
#[must_use]
pub fn round_money(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_eur_is_default() {
        let currency = Currency::default();
        assert_eq!(currency.code, "EUR");
        assert_eq!(currency.symbol, "€");
        assert_eq!(currency.position, SymbolPosition::Postfix);
    }

    #[test]
    fn test_missing_position_deserializes_as_postfix() {
        let currency: Currency = config::Config::builder()
            .set_override("code", "CHF")
            .unwrap()
            .set_override("symbol", "CHF")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(currency.position, SymbolPosition::Postfix);
        assert_eq!(currency.decorate("5.00"), "5.00 CHF");
    }

    #[test]
    fn test_decorate_postfix() {
        assert_eq!(Currency::eur().decorate("1234.50"), "1234.50 €");
    }

    #[test]
    fn test_decorate_prefix() {
        let currency = Currency::eur().with_position(SymbolPosition::Prefix);
        assert_eq!(currency.decorate("1234.50"), "€ 1234.50");
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::eur().to_string(), "EUR");
        assert_eq!(Currency::from_str("usd").unwrap().to_string(), "USD");
    }

    #[rstest]
    #[case("EUR", "€", SymbolPosition::Postfix)]
    #[case("usd", "$", SymbolPosition::Prefix)]
    #[case(" gbp ", "£", SymbolPosition::Prefix)]
    #[case("CHF", "CHF", SymbolPosition::Postfix)]
    fn test_currency_from_str(
        #[case] input: &str,
        #[case] symbol: &str,
        #[case] position: SymbolPosition,
    ) {
        let currency = Currency::from_str(input).unwrap();
        assert_eq!(currency.symbol, symbol);
        assert_eq!(currency.position, position);
    }

    #[test]
    fn test_currency_from_str_unknown() {
        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[rstest]
    #[case(dec!(0.125), dec!(0.12))]
    #[case(dec!(0.135), dec!(0.14))]
    #[case(dec!(2.5), dec!(2.5))]
    #[case(dec!(1.005), dec!(1.00))]
    #[case(dec!(1.0051), dec!(1.01))]
    fn test_round_money_bankers(#[case] value: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_money(value, MONEY_DECIMAL_PLACES), expected);
    }

    #[test]
    fn test_round_money_whole_units() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
    }
}
