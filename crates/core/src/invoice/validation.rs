//! Business rule validation for line item declarations.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::LineItemInput;

/// Exclusive upper bound for VAT rates in percent.
pub const MAX_VAT_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Parses a decimal from user input.
///
/// # Errors
///
/// Returns `InvoiceError::NotANumber` naming `field` if `text` is not numeric.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, InvoiceError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed).map_err(|_| InvoiceError::NotANumber {
        field,
        value: trimmed.to_string(),
    })
}

/// Checks `0 <= rate < 100`.
///
/// # Errors
///
/// Returns a description of the violated bound.
pub fn validate_vat_rate(rate: Decimal) -> Result<(), String> {
    if rate < Decimal::ZERO {
        return Err(format!("tax rate must not be negative, got {rate}"));
    }
    if rate >= MAX_VAT_RATE {
        return Err(format!("tax rate must be below 100 %, got {rate}"));
    }
    Ok(())
}

/// Validates a declaration against the resolved tax rate.
///
/// Runs before the running totals are touched.
///
/// # Errors
///
/// Returns `InvoiceError::InvalidItem` describing the first violated rule.
pub fn validate_item(
    position: usize,
    input: &LineItemInput,
    tax_rate: Decimal,
) -> Result<(), InvoiceError> {
    let invalid = |reason: String| InvoiceError::InvalidItem {
        position,
        label: input.label.clone(),
        reason,
    };

    if input.label.trim().is_empty() {
        return Err(invalid("label must not be blank".to_string()));
    }
    if input.quantity < Decimal::ZERO {
        return Err(invalid(format!(
            "quantity must not be negative, got {}",
            input.quantity
        )));
    }
    if input.unit_price < Decimal::ZERO {
        return Err(invalid(format!(
            "unit price must not be negative, got {}",
            input.unit_price
        )));
    }
    validate_vat_rate(tax_rate).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("19", dec!(19))]
    #[case(" 7.5 ", dec!(7.5))]
    #[case("0", dec!(0))]
    #[case("-3", dec!(-3))]
    fn test_parse_decimal(#[case] text: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal("tax_rate", text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1,5")]
    #[case("12.3.4")]
    fn test_parse_decimal_rejects_non_numeric(#[case] text: &str) {
        assert!(matches!(
            parse_decimal("unit_price", text),
            Err(InvoiceError::NotANumber {
                field: "unit_price",
                ..
            })
        ));
    }

    #[rstest]
    #[case(dec!(0), true)]
    #[case(dec!(19), true)]
    #[case(dec!(99.99), true)]
    #[case(dec!(100), false)]
    #[case(dec!(-0.01), false)]
    fn test_vat_rate_bounds(#[case] rate: Decimal, #[case] valid: bool) {
        assert_eq!(validate_vat_rate(rate).is_ok(), valid);
    }

    #[test]
    fn test_zero_quantity_and_price_are_valid() {
        let input = LineItemInput::new("Free sample", dec!(0), dec!(0));
        assert!(validate_item(1, &input, dec!(19)).is_ok());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let input = LineItemInput::new("Consulting", dec!(-1), dec!(100));
        let err = validate_item(3, &input, dec!(19)).unwrap_err();
        assert!(matches!(
            err,
            InvoiceError::InvalidItem { position: 3, ref label, .. } if label == "Consulting"
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let input = LineItemInput::new("Consulting", dec!(1), dec!(-100));
        assert!(validate_item(1, &input, dec!(19)).is_err());
    }

    #[test]
    fn test_blank_label_rejected() {
        let input = LineItemInput::new("   ", dec!(1), dec!(1));
        assert!(validate_item(1, &input, dec!(0)).is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let input = LineItemInput::new("Consulting", dec!(1), dec!(1));
        let err = validate_item(1, &input, dec!(-5)).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }
}
